//! Repository for the `education_records` table.

use majlis_core::types::{EntryId, UserId};
use sqlx::{PgPool, QueryBuilder};

use crate::models::education_record::{EducationRecord, EducationRecordWrite};

/// Column list for `education_records` queries.
const COLUMNS: &str = "id, user_id, school_ref, school_custom, degree_type, field_of_study, \
     graduation_year, created_at, updated_at";

/// Provides operations for education records.
pub struct EducationRecordRepo;

impl EducationRecordRepo {
    /// List a member's education records, most recent graduation first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<EducationRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM education_records \
             WHERE user_id = $1 \
             ORDER BY graduation_year DESC NULLS LAST, id"
        );
        sqlx::query_as::<_, EducationRecord>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Ids of the member's persisted education records.
    pub async fn list_ids_by_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<EntryId>, sqlx::Error> {
        let rows: Vec<(EntryId,)> = sqlx::query_as(
            "SELECT id FROM education_records WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Upsert a batch of rows in one statement, keyed on the entry id.
    pub async fn upsert_many(
        pool: &PgPool,
        user_id: UserId,
        rows: &[EducationRecordWrite],
    ) -> Result<(), sqlx::Error> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut qb: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(
            "INSERT INTO education_records \
             (id, user_id, school_ref, school_custom, degree_type, field_of_study, \
              graduation_year) ",
        );
        qb.push_values(rows, |mut b, row| {
            b.push_bind(row.id)
                .push_bind(user_id)
                .push_bind(&row.school_ref)
                .push_bind(&row.school_custom)
                .push_bind(&row.degree_type)
                .push_bind(&row.field_of_study)
                .push_bind(row.graduation_year);
        });
        qb.push(
            " ON CONFLICT (id) DO UPDATE SET \
                school_ref = EXCLUDED.school_ref, \
                school_custom = EXCLUDED.school_custom, \
                degree_type = EXCLUDED.degree_type, \
                field_of_study = EXCLUDED.field_of_study, \
                graduation_year = EXCLUDED.graduation_year, \
                updated_at = NOW()",
        );

        qb.build().execute(pool).await?;
        Ok(())
    }

    /// Delete exactly the given ids for this member.
    pub async fn delete_by_ids(
        pool: &PgPool,
        user_id: UserId,
        ids: &[EntryId],
    ) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM education_records WHERE user_id = $1 AND id = ANY($2)")
                .bind(user_id)
                .bind(ids)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Delete every education record for this member.
    pub async fn delete_by_user(pool: &PgPool, user_id: UserId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM education_records WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
