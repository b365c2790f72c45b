//! Repository for the read-only catalog tables.

use sqlx::PgPool;

use crate::models::catalog::{Chapter, RoleType, Skill, Subregion};

/// Provides read operations for reference data.
pub struct CatalogRepo;

impl CatalogRepo {
    /// List all subregions with their region names, alphabetical.
    pub async fn list_subregions(pool: &PgPool) -> Result<Vec<Subregion>, sqlx::Error> {
        sqlx::query_as::<_, Subregion>(
            "SELECT s.id, s.region_id, s.name, r.name AS region_name \
             FROM subregions s \
             JOIN regions r ON r.id = s.region_id \
             ORDER BY r.name, s.name",
        )
        .fetch_all(pool)
        .await
    }

    /// List the chapters under a subregion, alphabetical.
    pub async fn list_chapters_by_subregion(
        pool: &PgPool,
        subregion_id: &str,
    ) -> Result<Vec<Chapter>, sqlx::Error> {
        sqlx::query_as::<_, Chapter>(
            "SELECT id, subregion_id, name FROM chapters \
             WHERE subregion_id = $1 \
             ORDER BY name",
        )
        .bind(subregion_id)
        .fetch_all(pool)
        .await
    }

    /// Whether a chapter exists under the given subregion.
    pub async fn chapter_in_subregion(
        pool: &PgPool,
        chapter_id: &str,
        subregion_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT id FROM chapters WHERE id = $1 AND subregion_id = $2")
                .bind(chapter_id)
                .bind(subregion_id)
                .fetch_optional(pool)
                .await?;
        Ok(row.is_some())
    }

    /// List all role types grouped by organizational tier.
    pub async fn list_role_types(pool: &PgPool) -> Result<Vec<RoleType>, sqlx::Error> {
        sqlx::query_as::<_, RoleType>(
            "SELECT id, name, category FROM role_types ORDER BY category, name",
        )
        .fetch_all(pool)
        .await
    }

    /// List the selectable skills, alphabetical by label.
    pub async fn list_skills(pool: &PgPool) -> Result<Vec<Skill>, sqlx::Error> {
        sqlx::query_as::<_, Skill>("SELECT id, label FROM skills ORDER BY label")
            .fetch_all(pool)
            .await
    }
}
