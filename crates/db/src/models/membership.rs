//! Membership entity model.
//!
//! A membership ties a member to a chapter. Each member has at most one
//! `active` membership; location changes update it in place rather than
//! creating history rows.

use chrono::NaiveDate;
use majlis_core::types::{Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Status value for a live membership.
pub const STATUS_ACTIVE: &str = "active";

/// A row from the `memberships` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Membership {
    pub id: Uuid,
    pub user_id: UserId,
    pub chapter_id: String,
    pub status: String,
    pub joined_at: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
