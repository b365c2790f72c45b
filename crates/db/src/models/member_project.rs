//! Member project entity model and conversions to/from the draft entry.

use majlis_core::choice::Choice;
use majlis_core::entry::{MonthYear, ProjectEntry};
use majlis_core::types::{EntryId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `member_projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MemberProject {
    pub id: EntryId,
    pub user_id: UserId,
    pub project_type_id: Option<String>,
    pub project_type_custom: Option<String>,
    pub role_held: Option<String>,
    pub mentor_user_id: Option<String>,
    pub mentor_custom_name: Option<String>,
    pub start_month: Option<i32>,
    pub start_year: Option<i32>,
    pub end_month: Option<i32>,
    pub end_year: Option<i32>,
    pub is_current: bool,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The writable columns of a member project, produced from a draft entry.
#[derive(Debug, Clone)]
pub struct MemberProjectWrite {
    pub id: EntryId,
    pub project_type_id: Option<String>,
    pub project_type_custom: Option<String>,
    pub role_held: Option<String>,
    pub mentor_user_id: Option<String>,
    pub mentor_custom_name: Option<String>,
    pub start_month: Option<i32>,
    pub start_year: Option<i32>,
    pub end_month: Option<i32>,
    pub end_year: Option<i32>,
    pub is_current: bool,
    pub notes: Option<String>,
}

fn split_month_year(my: Option<MonthYear>) -> (Option<i32>, Option<i32>) {
    match my {
        Some(MonthYear { month, year }) => (Some(i32::from(month)), Some(year)),
        None => (None, None),
    }
}

fn join_month_year(month: Option<i32>, year: Option<i32>) -> Option<MonthYear> {
    match (month, year) {
        (Some(m), Some(y)) => u8::try_from(m).ok().map(|m| MonthYear::new(m, y)),
        _ => None,
    }
}

impl From<&ProjectEntry> for MemberProjectWrite {
    fn from(entry: &ProjectEntry) -> Self {
        let entry = entry.normalized();
        let (project_type_id, project_type_custom) = entry.project_type.into_columns();
        let (mentor_user_id, mentor_custom_name) = entry.mentor.into_columns();
        let (start_month, start_year) = split_month_year(entry.start);
        let (end_month, end_year) = split_month_year(entry.end);
        Self {
            id: entry.id,
            project_type_id,
            project_type_custom,
            role_held: entry.role_held,
            mentor_user_id,
            mentor_custom_name,
            start_month,
            start_year,
            end_month,
            end_year,
            is_current: entry.is_current,
            notes: entry.notes,
        }
    }
}

impl From<MemberProject> for ProjectEntry {
    fn from(row: MemberProject) -> Self {
        Self {
            id: row.id,
            project_type: Choice::from_columns(row.project_type_id, row.project_type_custom),
            role_held: row.role_held,
            mentor: Choice::from_columns(row.mentor_user_id, row.mentor_custom_name),
            start: join_month_year(row.start_month, row.start_year),
            end: join_month_year(row.end_month, row.end_year),
            is_current: row.is_current,
            notes: row.notes,
        }
    }
}
