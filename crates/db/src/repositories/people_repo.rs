//! Repository for the member directory.

use sqlx::{PgPool, QueryBuilder};

use majlis_core::types::UserId;

use crate::models::person::{DirectoryFilter, PersonListItem};

/// The directory projection: identity, geography via the active
/// membership, aggregated active role names, and years of membership.
/// Only members who completed onboarding are listed.
const SELECT: &str = "SELECT \
        u.id, u.first_name, u.last_name, u.email, u.skills, \
        c.id AS chapter_id, c.name AS chapter_name, \
        s.id AS subregion_id, s.name AS subregion_name, \
        r.id AS region_id, r.name AS region_name, \
        COALESCE(( \
            SELECT ARRAY_AGG(COALESCE(rt.name, ra.role_type_custom) ORDER BY ra.start_year DESC) \
            FROM role_assignments ra \
            LEFT JOIN role_types rt ON rt.id = ra.role_type_id \
            WHERE ra.user_id = u.id AND ra.is_current \
        ), ARRAY[]::TEXT[]) AS active_roles, \
        (EXTRACT(YEAR FROM AGE(CURRENT_DATE, m.joined_at)))::int AS years_of_membership \
     FROM users u \
     LEFT JOIN memberships m ON m.user_id = u.id AND m.status = 'active' \
     LEFT JOIN chapters c ON c.id = m.chapter_id \
     LEFT JOIN subregions s ON s.id = c.subregion_id \
     LEFT JOIN regions r ON r.id = s.region_id \
     WHERE u.onboarding_completed_at IS NOT NULL";

/// Provides read operations for the member directory.
pub struct PeopleRepo;

impl PeopleRepo {
    /// List directory members matching the filter, name-ordered, paged.
    pub async fn list(
        pool: &PgPool,
        filter: &DirectoryFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PersonListItem>, sqlx::Error> {
        let mut qb: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(SELECT);

        if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let pattern = format!("%{}%", search.trim());
            qb.push(" AND (u.first_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR u.last_name ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(subregion_id) = &filter.subregion_id {
            qb.push(" AND s.id = ").push_bind(subregion_id);
        }
        if let Some(chapter_id) = &filter.chapter_id {
            qb.push(" AND c.id = ").push_bind(chapter_id);
        }
        if let Some(skill) = &filter.skill {
            qb.push(" AND ").push_bind(skill).push(" = ANY(u.skills)");
        }

        qb.push(" ORDER BY u.first_name, u.last_name, u.id LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        qb.build_query_as::<PersonListItem>().fetch_all(pool).await
    }

    /// Fetch one completed-onboarding member for the profile view.
    pub async fn find_by_id(
        pool: &PgPool,
        id: UserId,
    ) -> Result<Option<PersonListItem>, sqlx::Error> {
        let query = format!("{SELECT} AND u.id = $1");
        sqlx::query_as::<_, PersonListItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
