//! Repository for the `memberships` table.

use majlis_core::types::UserId;
use sqlx::PgPool;

use crate::models::membership::{Membership, STATUS_ACTIVE};

/// Column list for `memberships` queries.
const COLUMNS: &str = "id, user_id, chapter_id, status, joined_at, created_at, updated_at";

/// Provides operations for chapter memberships.
pub struct MembershipRepo;

impl MembershipRepo {
    /// Find the member's active membership, if any.
    pub async fn find_active_by_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM memberships \
             WHERE user_id = $1 AND status = $2"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(user_id)
            .bind(STATUS_ACTIVE)
            .fetch_optional(pool)
            .await
    }

    /// Point the active membership at a chapter: update the existing
    /// active row in place, or create one dated today when the member has
    /// none yet.
    pub async fn upsert_active(
        pool: &PgPool,
        user_id: UserId,
        chapter_id: &str,
    ) -> Result<Membership, sqlx::Error> {
        if let Some(existing) = Self::find_active_by_user(pool, user_id).await? {
            let query = format!(
                "UPDATE memberships SET chapter_id = $2, updated_at = NOW() \
                 WHERE id = $1 \
                 RETURNING {COLUMNS}"
            );
            sqlx::query_as::<_, Membership>(&query)
                .bind(existing.id)
                .bind(chapter_id)
                .fetch_one(pool)
                .await
        } else {
            let query = format!(
                "INSERT INTO memberships (user_id, chapter_id, status, joined_at) \
                 VALUES ($1, $2, $3, CURRENT_DATE) \
                 RETURNING {COLUMNS}"
            );
            sqlx::query_as::<_, Membership>(&query)
                .bind(user_id)
                .bind(chapter_id)
                .bind(STATUS_ACTIVE)
                .fetch_one(pool)
                .await
        }
    }
}
