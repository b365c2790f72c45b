//! Education record entity model and conversions to/from the draft entry.

use majlis_core::choice::Choice;
use majlis_core::entry::EducationEntry;
use majlis_core::types::{EntryId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `education_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EducationRecord {
    pub id: EntryId,
    pub user_id: UserId,
    pub school_ref: Option<String>,
    pub school_custom: Option<String>,
    pub degree_type: Option<String>,
    pub field_of_study: Option<String>,
    pub graduation_year: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The writable columns of an education record.
#[derive(Debug, Clone)]
pub struct EducationRecordWrite {
    pub id: EntryId,
    pub school_ref: Option<String>,
    pub school_custom: Option<String>,
    pub degree_type: Option<String>,
    pub field_of_study: Option<String>,
    pub graduation_year: Option<i32>,
}

impl From<&EducationEntry> for EducationRecordWrite {
    fn from(entry: &EducationEntry) -> Self {
        let entry = entry.clone();
        let (school_ref, school_custom) = entry.school.into_columns();
        Self {
            id: entry.id,
            school_ref,
            school_custom,
            degree_type: entry.degree_type,
            field_of_study: entry.field_of_study,
            graduation_year: entry.graduation_year,
        }
    }
}

impl From<EducationRecord> for EducationEntry {
    fn from(row: EducationRecord) -> Self {
        Self {
            id: row.id,
            school: Choice::from_columns(row.school_ref, row.school_custom),
            degree_type: row.degree_type,
            field_of_study: row.field_of_study,
            graduation_year: row.graduation_year,
        }
    }
}
