//! Repository for the `role_assignments` table.

use majlis_core::types::{EntryId, UserId};
use sqlx::{PgPool, QueryBuilder};

use crate::models::role_assignment::{RoleAssignment, RoleAssignmentWrite};

/// Column list for `role_assignments` queries.
const COLUMNS: &str = "id, user_id, role_type_id, role_type_custom, mentor_user_id, \
     mentor_custom_name, start_month, start_year, end_month, end_year, is_current, \
     notes, created_at, updated_at";

/// Provides operations for role assignments.
pub struct RoleAssignmentRepo;

impl RoleAssignmentRepo {
    /// List a member's role assignments, most recent first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<RoleAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM role_assignments \
             WHERE user_id = $1 \
             ORDER BY start_year DESC NULLS LAST, start_month DESC NULLS LAST, id"
        );
        sqlx::query_as::<_, RoleAssignment>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Ids of the member's persisted role assignments.
    pub async fn list_ids_by_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<EntryId>, sqlx::Error> {
        let rows: Vec<(EntryId,)> =
            sqlx::query_as("SELECT id FROM role_assignments WHERE user_id = $1 ORDER BY created_at")
                .bind(user_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Upsert a batch of rows in one statement, keyed on the entry id:
    /// new ids insert, existing ids update in place.
    pub async fn upsert_many(
        pool: &PgPool,
        user_id: UserId,
        rows: &[RoleAssignmentWrite],
    ) -> Result<(), sqlx::Error> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut qb: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(
            "INSERT INTO role_assignments \
             (id, user_id, role_type_id, role_type_custom, mentor_user_id, \
              mentor_custom_name, start_month, start_year, end_month, end_year, \
              is_current, notes) ",
        );
        qb.push_values(rows, |mut b, row| {
            b.push_bind(row.id)
                .push_bind(user_id)
                .push_bind(&row.role_type_id)
                .push_bind(&row.role_type_custom)
                .push_bind(&row.mentor_user_id)
                .push_bind(&row.mentor_custom_name)
                .push_bind(row.start_month)
                .push_bind(row.start_year)
                .push_bind(row.end_month)
                .push_bind(row.end_year)
                .push_bind(row.is_current)
                .push_bind(&row.notes);
        });
        qb.push(
            " ON CONFLICT (id) DO UPDATE SET \
                role_type_id = EXCLUDED.role_type_id, \
                role_type_custom = EXCLUDED.role_type_custom, \
                mentor_user_id = EXCLUDED.mentor_user_id, \
                mentor_custom_name = EXCLUDED.mentor_custom_name, \
                start_month = EXCLUDED.start_month, \
                start_year = EXCLUDED.start_year, \
                end_month = EXCLUDED.end_month, \
                end_year = EXCLUDED.end_year, \
                is_current = EXCLUDED.is_current, \
                notes = EXCLUDED.notes, \
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
            sqlx::query("DELETE FROM role_assignments WHERE user_id = $1 AND id = ANY($2)")
                .bind(user_id)
                .bind(ids)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Delete every role assignment for this member.
    pub async fn delete_by_user(pool: &PgPool, user_id: UserId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM role_assignments WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
