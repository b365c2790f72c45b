//! Role assignment entity model and conversions to/from the draft entry.

use majlis_core::choice::Choice;
use majlis_core::entry::{MonthYear, RoleEntry};
use majlis_core::types::{EntryId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `role_assignments` table. The catalog-or-custom pairs
/// are stored flattened; exactly one side of each pair is non-null.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoleAssignment {
    pub id: EntryId,
    pub user_id: UserId,
    pub role_type_id: Option<String>,
    pub role_type_custom: Option<String>,
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

/// The writable columns of a role assignment, produced from a draft entry
/// for upserting. An ongoing role never carries an end date.
#[derive(Debug, Clone)]
pub struct RoleAssignmentWrite {
    pub id: EntryId,
    pub role_type_id: Option<String>,
    pub role_type_custom: Option<String>,
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

impl From<&RoleEntry> for RoleAssignmentWrite {
    fn from(entry: &RoleEntry) -> Self {
        let entry = entry.normalized();
        let (role_type_id, role_type_custom) = entry.role_type.into_columns();
        let (mentor_user_id, mentor_custom_name) = entry.mentor.into_columns();
        let (start_month, start_year) = split_month_year(entry.start);
        let (end_month, end_year) = split_month_year(entry.end);
        Self {
            id: entry.id,
            role_type_id,
            role_type_custom,
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

impl From<RoleAssignment> for RoleEntry {
    fn from(row: RoleAssignment) -> Self {
        Self {
            id: row.id,
            role_type: Choice::from_columns(row.role_type_id, row.role_type_custom),
            mentor: Choice::from_columns(row.mentor_user_id, row.mentor_custom_name),
            start: join_month_year(row.start_month, row.start_year),
            end: join_month_year(row.end_month, row.end_year),
            is_current: row.is_current,
            notes: row.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_row_drops_end_date_for_ongoing_roles() {
        let mut entry = RoleEntry::new();
        entry.role_type = Choice::choose_existing("rc", None);
        entry.start = Some(MonthYear::new(9, 2021));
        entry.end = Some(MonthYear::new(6, 2023));
        entry.is_current = true;

        let write = RoleAssignmentWrite::from(&entry);
        assert_eq!(write.end_month, None);
        assert_eq!(write.end_year, None);
        assert_eq!(write.start_month, Some(9));
        assert_eq!(write.role_type_id.as_deref(), Some("rc"));
        assert_eq!(write.role_type_custom, None);
    }

    #[test]
    fn custom_choice_lands_in_custom_column() {
        let mut entry = RoleEntry::new();
        entry.role_type = Choice::choose_custom("Volunteer lead");

        let write = RoleAssignmentWrite::from(&entry);
        assert_eq!(write.role_type_id, None);
        assert_eq!(write.role_type_custom.as_deref(), Some("Volunteer lead"));
    }
}
