//! Read-only reference data: geography, role types, and the skill list.
//!
//! Regions exist only as grouping labels; they surface through the
//! `region_name` joins rather than a model of their own.

use serde::Serialize;
use sqlx::FromRow;

/// A row from the `subregions` table, with its region name joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subregion {
    pub id: String,
    pub region_id: String,
    pub name: String,
    pub region_name: String,
}

/// A row from the `chapters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Chapter {
    pub id: String,
    pub subregion_id: String,
    pub name: String,
}

/// A row from the `role_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoleType {
    pub id: String,
    pub name: String,
    /// Organizational tier the role belongs to (national, regional,
    /// subregional, chapter).
    pub category: String,
}

/// A row from the `skills` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Skill {
    pub id: String,
    pub label: String,
}
