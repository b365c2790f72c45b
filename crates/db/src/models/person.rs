//! Directory listing projections.

use majlis_core::types::UserId;
use serde::Serialize;
use sqlx::FromRow;

/// One member in the directory listing: identity plus geography plus
/// active role names, aggregated SQL-side.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PersonListItem {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub skills: Vec<String>,
    pub chapter_id: Option<String>,
    pub chapter_name: Option<String>,
    pub subregion_id: Option<String>,
    pub subregion_name: Option<String>,
    pub region_id: Option<String>,
    pub region_name: Option<String>,
    /// Names of the member's currently-active roles.
    pub active_roles: Vec<String>,
    /// Whole years since the member joined their chapter.
    pub years_of_membership: Option<i32>,
}

/// Filters accepted by the directory query. All optional; combined with
/// AND semantics.
#[derive(Debug, Clone, Default)]
pub struct DirectoryFilter {
    /// Case-insensitive substring match over first and last name.
    pub search: Option<String>,
    pub subregion_id: Option<String>,
    pub chapter_id: Option<String>,
    /// Members whose skill set contains this skill id.
    pub skill: Option<String>,
}
