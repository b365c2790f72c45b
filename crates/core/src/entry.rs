//! Repeatable profile sub-records: role assignments, projects, and
//! education lines.
//!
//! Each entry is created in memory with only its id and defaults, filled
//! in incrementally as the member edits, and persisted under its own
//! client-generated id so repeated saves update rather than duplicate.
//! Entries are pure value types; validation lives in [`crate::validate`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::choice::Choice;
use crate::types::EntryId;

/// A month/year pair used for entry date ranges (day precision is never
/// collected).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthYear {
    /// 1-based calendar month.
    pub month: u8,
    pub year: i32,
}

impl MonthYear {
    pub fn new(month: u8, year: i32) -> Self {
        Self { month, year }
    }
}

/// Anything keyed by a stable entry id. The reconciler works over this.
pub trait Keyed {
    fn entry_id(&self) -> EntryId;
}

// ---------------------------------------------------------------------------
// Role assignments
// ---------------------------------------------------------------------------

/// One organizational role a member has held.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub id: EntryId,
    /// Role type: catalog value or free text.
    pub role_type: Choice,
    /// The mentor this role reported to: catalog member or typed name.
    pub mentor: Choice,
    pub start: Option<MonthYear>,
    pub end: Option<MonthYear>,
    pub is_current: bool,
    pub notes: Option<String>,
}

impl RoleEntry {
    /// A fresh entry with only an id and defaults.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            ..Default::default()
        }
    }

    /// Copy of this entry ready for persistence: an ongoing role carries
    /// no end date regardless of what the draft held.
    pub fn normalized(&self) -> Self {
        let mut e = self.clone();
        if e.is_current {
            e.end = None;
        }
        e
    }
}

impl Keyed for RoleEntry {
    fn entry_id(&self) -> EntryId {
        self.id
    }
}

/// Partial update for a [`RoleEntry`]. Only non-`None` fields are applied;
/// the `Choice` fields replace wholesale since selecting one branch must
/// clear the other.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleEntryPatch {
    pub role_type: Option<Choice>,
    pub mentor: Option<Choice>,
    pub start: Option<Option<MonthYear>>,
    pub end: Option<Option<MonthYear>>,
    pub is_current: Option<bool>,
    pub notes: Option<Option<String>>,
}

impl RoleEntry {
    /// Merge a patch onto this entry.
    pub fn apply(&mut self, patch: RoleEntryPatch) {
        if let Some(v) = patch.role_type {
            self.role_type = v;
        }
        if let Some(v) = patch.mentor {
            self.mentor = v;
        }
        if let Some(v) = patch.start {
            self.start = v;
        }
        if let Some(v) = patch.end {
            self.end = v;
        }
        if let Some(v) = patch.is_current {
            self.is_current = v;
        }
        if let Some(v) = patch.notes {
            self.notes = v;
        }
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// One project a member has worked on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub id: EntryId,
    pub project_type: Choice,
    /// Free-text description of the role held on the project.
    pub role_held: Option<String>,
    pub mentor: Choice,
    pub start: Option<MonthYear>,
    pub end: Option<MonthYear>,
    pub is_current: bool,
    pub notes: Option<String>,
}

impl ProjectEntry {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            ..Default::default()
        }
    }

    pub fn normalized(&self) -> Self {
        let mut e = self.clone();
        if e.is_current {
            e.end = None;
        }
        e
    }
}

impl Keyed for ProjectEntry {
    fn entry_id(&self) -> EntryId {
        self.id
    }
}

/// Partial update for a [`ProjectEntry`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectEntryPatch {
    pub project_type: Option<Choice>,
    pub role_held: Option<Option<String>>,
    pub mentor: Option<Choice>,
    pub start: Option<Option<MonthYear>>,
    pub end: Option<Option<MonthYear>>,
    pub is_current: Option<bool>,
    pub notes: Option<Option<String>>,
}

impl ProjectEntry {
    pub fn apply(&mut self, patch: ProjectEntryPatch) {
        if let Some(v) = patch.project_type {
            self.project_type = v;
        }
        if let Some(v) = patch.role_held {
            self.role_held = v;
        }
        if let Some(v) = patch.mentor {
            self.mentor = v;
        }
        if let Some(v) = patch.start {
            self.start = v;
        }
        if let Some(v) = patch.end {
            self.end = v;
        }
        if let Some(v) = patch.is_current {
            self.is_current = v;
        }
        if let Some(v) = patch.notes {
            self.notes = v;
        }
    }
}

// ---------------------------------------------------------------------------
// Education
// ---------------------------------------------------------------------------

/// One education record (college level only).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub id: EntryId,
    /// School: catalog university or typed name.
    pub school: Choice,
    pub degree_type: Option<String>,
    pub field_of_study: Option<String>,
    pub graduation_year: Option<i32>,
}

impl EducationEntry {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            ..Default::default()
        }
    }
}

impl Keyed for EducationEntry {
    fn entry_id(&self) -> EntryId {
        self.id
    }
}

/// Partial update for an [`EducationEntry`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EducationEntryPatch {
    pub school: Option<Choice>,
    pub degree_type: Option<Option<String>>,
    pub field_of_study: Option<Option<String>>,
    pub graduation_year: Option<Option<i32>>,
}

impl EducationEntry {
    pub fn apply(&mut self, patch: EducationEntryPatch) {
        if let Some(v) = patch.school {
            self.school = v;
        }
        if let Some(v) = patch.degree_type {
            self.degree_type = v;
        }
        if let Some(v) = patch.field_of_study {
            self.field_of_study = v;
        }
        if let Some(v) = patch.graduation_year {
            self.graduation_year = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_role_has_only_id_and_defaults() {
        let e = RoleEntry::new();
        assert!(!e.id.is_nil());
        assert!(!e.is_current);
        assert_eq!(e.role_type, Choice::None);
        assert_eq!(e.start, None);
        assert_eq!(e.notes, None);
    }

    #[test]
    fn normalized_clears_end_for_ongoing_roles() {
        let mut e = RoleEntry::new();
        e.start = Some(MonthYear::new(9, 2021));
        e.end = Some(MonthYear::new(6, 2023));
        e.is_current = true;

        let n = e.normalized();
        assert_eq!(n.end, None);
        // The draft itself is untouched.
        assert!(e.end.is_some());
    }

    #[test]
    fn normalized_keeps_end_for_finished_roles() {
        let mut e = ProjectEntry::new();
        e.end = Some(MonthYear::new(6, 2023));
        e.is_current = false;
        assert_eq!(e.normalized().end, Some(MonthYear::new(6, 2023)));
    }

    #[test]
    fn patch_merges_only_provided_fields() {
        let mut e = RoleEntry::new();
        e.notes = Some("kept".into());

        e.apply(RoleEntryPatch {
            role_type: Some(Choice::choose_existing("rc", None)),
            start: Some(Some(MonthYear::new(1, 2024))),
            ..Default::default()
        });

        assert_eq!(e.role_type.existing_id(), Some("rc"));
        assert_eq!(e.start, Some(MonthYear::new(1, 2024)));
        assert_eq!(e.notes.as_deref(), Some("kept"));
    }

    #[test]
    fn patch_can_clear_a_field() {
        let mut e = RoleEntry::new();
        e.notes = Some("old".into());
        e.apply(RoleEntryPatch {
            notes: Some(None),
            ..Default::default()
        });
        assert_eq!(e.notes, None);
    }
}
