//! The profile draft: the in-memory, actively-edited copy of a member's
//! full profile.
//!
//! A draft is populated from persisted data when an edit session opens,
//! mutated by discrete user actions, and written back through the
//! reconciler on save. Every mutating operation here is atomic with
//! respect to a single user action; multi-field updates land in one call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entry::{
    EducationEntry, EducationEntryPatch, ProjectEntry, ProjectEntryPatch, RoleEntry,
    RoleEntryPatch,
};
use crate::error::CoreError;
use crate::types::EntryId;

/// Minimum number of skills a member must select.
pub const SKILLS_MIN: usize = 3;

/// Maximum number of skills a member may select.
pub const SKILLS_MAX: usize = 5;

// ---------------------------------------------------------------------------
// Education level
// ---------------------------------------------------------------------------

/// A member's education level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    HighSchoolCurrent,
    HighSchoolGraduate,
    College,
}

impl EducationLevel {
    /// Parse a level string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "high_school_current" => Ok(Self::HighSchoolCurrent),
            "high_school_graduate" => Ok(Self::HighSchoolGraduate),
            "college" => Ok(Self::College),
            _ => Err(CoreError::Validation(format!(
                "Invalid education level '{s}'. Must be one of: \
                 high_school_current, high_school_graduate, college"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighSchoolCurrent => "high_school_current",
            Self::HighSchoolGraduate => "high_school_graduate",
            Self::College => "college",
        }
    }
}

// ---------------------------------------------------------------------------
// Entry categories
// ---------------------------------------------------------------------------

/// The three repeatable profile sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryCategory {
    Roles,
    Projects,
    Education,
}

impl EntryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roles => "roles",
            Self::Projects => "projects",
            Self::Education => "education",
        }
    }
}

// ---------------------------------------------------------------------------
// Profile draft
// ---------------------------------------------------------------------------

/// The full editable profile: scalar fields plus one entry list per
/// category plus the selected skill set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub phone: Option<String>,
    pub personal_email: Option<String>,
    pub ethnicity: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub subregion_id: Option<String>,
    pub chapter_id: Option<String>,
    pub education_level: Option<EducationLevel>,
    pub roles: Vec<RoleEntry>,
    pub projects: Vec<ProjectEntry>,
    pub education: Vec<EducationEntry>,
    /// Selected skill ids, insertion-ordered, no duplicates.
    pub skills: Vec<String>,
}

/// Atomic multi-scalar update. Only provided fields are applied; inner
/// `Option`s allow clearing. Setting a different subregion cascades a
/// reset of the dependent chapter selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScalarPatch {
    pub phone: Option<Option<String>>,
    pub personal_email: Option<Option<String>>,
    pub ethnicity: Option<Option<String>>,
    pub birth_date: Option<Option<NaiveDate>>,
    pub subregion_id: Option<Option<String>>,
    pub chapter_id: Option<Option<String>>,
    pub education_level: Option<Option<EducationLevel>>,
}

impl ProfileDraft {
    /// Apply a scalar patch in one action. The subregion cascade runs
    /// before an explicit chapter value in the same patch, so a patch may
    /// change both together.
    pub fn apply_scalars(&mut self, patch: ScalarPatch) {
        if let Some(v) = patch.phone {
            self.phone = v;
        }
        if let Some(v) = patch.personal_email {
            self.personal_email = v;
        }
        if let Some(v) = patch.ethnicity {
            self.ethnicity = v;
        }
        if let Some(v) = patch.birth_date {
            self.birth_date = v;
        }
        if let Some(v) = patch.subregion_id {
            self.set_subregion(v);
        }
        if let Some(v) = patch.chapter_id {
            self.chapter_id = v;
        }
        if let Some(v) = patch.education_level {
            self.education_level = v;
        }
    }

    /// Set the subregion. Picking a different subregion resets the
    /// dependent chapter selection; re-selecting the same one keeps it.
    pub fn set_subregion(&mut self, subregion_id: Option<String>) {
        if self.subregion_id != subregion_id {
            self.chapter_id = None;
        }
        self.subregion_id = subregion_id;
    }

    // -- Entry lists --

    /// Append an empty entry to a category, returning its id.
    pub fn add_entry(&mut self, category: EntryCategory) -> EntryId {
        match category {
            EntryCategory::Roles => {
                let e = RoleEntry::new();
                let id = e.id;
                self.roles.push(e);
                id
            }
            EntryCategory::Projects => {
                let e = ProjectEntry::new();
                let id = e.id;
                self.projects.push(e);
                id
            }
            EntryCategory::Education => {
                let e = EducationEntry::new();
                let id = e.id;
                self.education.push(e);
                id
            }
        }
    }

    /// Remove the entry at `index`, shifting later entries down. Removal
    /// is immediate and unrecoverable within the draft.
    pub fn remove_entry(&mut self, category: EntryCategory, index: usize) -> Result<(), CoreError> {
        let len = self.entry_count(category);
        if index >= len {
            return Err(Self::bad_index(category, index, len));
        }
        match category {
            EntryCategory::Roles => {
                self.roles.remove(index);
            }
            EntryCategory::Projects => {
                self.projects.remove(index);
            }
            EntryCategory::Education => {
                self.education.remove(index);
            }
        }
        Ok(())
    }

    /// Merge a patch onto the role entry at `index`.
    pub fn update_role(&mut self, index: usize, patch: RoleEntryPatch) -> Result<(), CoreError> {
        let len = self.roles.len();
        self.roles
            .get_mut(index)
            .ok_or_else(|| Self::bad_index(EntryCategory::Roles, index, len))?
            .apply(patch);
        Ok(())
    }

    /// Merge a patch onto the project entry at `index`.
    pub fn update_project(
        &mut self,
        index: usize,
        patch: ProjectEntryPatch,
    ) -> Result<(), CoreError> {
        let len = self.projects.len();
        self.projects
            .get_mut(index)
            .ok_or_else(|| Self::bad_index(EntryCategory::Projects, index, len))?
            .apply(patch);
        Ok(())
    }

    /// Merge a patch onto the education entry at `index`.
    pub fn update_education(
        &mut self,
        index: usize,
        patch: EducationEntryPatch,
    ) -> Result<(), CoreError> {
        let len = self.education.len();
        self.education
            .get_mut(index)
            .ok_or_else(|| Self::bad_index(EntryCategory::Education, index, len))?
            .apply(patch);
        Ok(())
    }

    fn entry_count(&self, category: EntryCategory) -> usize {
        match category {
            EntryCategory::Roles => self.roles.len(),
            EntryCategory::Projects => self.projects.len(),
            EntryCategory::Education => self.education.len(),
        }
    }

    fn bad_index(category: EntryCategory, index: usize, len: usize) -> CoreError {
        CoreError::Validation(format!(
            "No {} entry at index {index} (list has {len})",
            category.as_str()
        ))
    }

    // -- Skills --

    /// Toggle a skill selection. Deselects if present; selects if absent
    /// and fewer than [`SKILLS_MAX`] are chosen. A selection attempt at
    /// the cap is rejected outright (returns `false`, set unchanged)
    /// rather than accepted and truncated.
    pub fn toggle_skill(&mut self, skill_id: &str) -> bool {
        if let Some(pos) = self.skills.iter().position(|s| s == skill_id) {
            self.skills.remove(pos);
            return true;
        }
        if self.skills.len() >= SKILLS_MAX {
            return false;
        }
        self.skills.push(skill_id.to_string());
        true
    }

    /// Drop the education entry list unless the level is college. The
    /// list is cleared, not merely ignored, so a later level change does
    /// not resurrect stale entries.
    pub fn clear_education_unless_college(&mut self) {
        if self.education_level != Some(EducationLevel::College) {
            self.education.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::Choice;

    fn draft_with_roles(n: usize) -> ProfileDraft {
        let mut d = ProfileDraft::default();
        for _ in 0..n {
            d.add_entry(EntryCategory::Roles);
        }
        d
    }

    #[test]
    fn scalar_patch_applies_only_provided_fields() {
        let mut d = ProfileDraft {
            phone: Some("5551234567".into()),
            ethnicity: Some("Somali".into()),
            ..Default::default()
        };

        d.apply_scalars(ScalarPatch {
            personal_email: Some(Some("a@b.c".into())),
            ethnicity: Some(None),
            ..Default::default()
        });

        assert_eq!(d.phone.as_deref(), Some("5551234567"));
        assert_eq!(d.personal_email.as_deref(), Some("a@b.c"));
        assert_eq!(d.ethnicity, None);
    }

    #[test]
    fn changing_subregion_resets_chapter() {
        let mut d = ProfileDraft::default();
        d.set_subregion(Some("houston".into()));
        d.chapter_id = Some("katy".into());

        d.set_subregion(Some("dallas".into()));
        assert_eq!(d.subregion_id.as_deref(), Some("dallas"));
        assert_eq!(d.chapter_id, None);
    }

    #[test]
    fn reselecting_same_subregion_keeps_chapter() {
        let mut d = ProfileDraft::default();
        d.set_subregion(Some("houston".into()));
        d.chapter_id = Some("katy".into());

        d.set_subregion(Some("houston".into()));
        assert_eq!(d.chapter_id.as_deref(), Some("katy"));
    }

    #[test]
    fn subregion_patch_cascades_atomically() {
        let mut d = ProfileDraft::default();
        d.set_subregion(Some("houston".into()));
        d.chapter_id = Some("katy".into());

        // One user action: new subregion and its chapter together.
        d.apply_scalars(ScalarPatch {
            subregion_id: Some(Some("dallas".into())),
            chapter_id: Some(Some("plano".into())),
            ..Default::default()
        });
        assert_eq!(d.chapter_id.as_deref(), Some("plano"));
    }

    #[test]
    fn add_entry_appends_empty() {
        let mut d = ProfileDraft::default();
        let id = d.add_entry(EntryCategory::Roles);
        assert_eq!(d.roles.len(), 1);
        assert_eq!(d.roles[0].id, id);
        assert!(!d.roles[0].is_current);
    }

    #[test]
    fn update_out_of_range_is_an_error() {
        let mut d = draft_with_roles(1);
        let err = d
            .update_role(
                3,
                RoleEntryPatch {
                    is_current: Some(true),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        // Nothing changed.
        assert!(!d.roles[0].is_current);
    }

    #[test]
    fn remove_shifts_indices_down() {
        let mut d = draft_with_roles(3);
        let ids: Vec<_> = d.roles.iter().map(|r| r.id).collect();

        d.remove_entry(EntryCategory::Roles, 1).unwrap();
        assert_eq!(d.roles.len(), 2);
        assert_eq!(d.roles[0].id, ids[0]);
        assert_eq!(d.roles[1].id, ids[2]);

        assert!(d.remove_entry(EntryCategory::Roles, 5).is_err());
    }

    #[test]
    fn update_merges_patch() {
        let mut d = draft_with_roles(1);
        d.update_role(
            0,
            RoleEntryPatch {
                role_type: Some(Choice::choose_custom("Founder")),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(d.roles[0].role_type.custom_text(), Some("Founder"));
    }

    #[test]
    fn skill_toggle_caps_at_five() {
        let mut d = ProfileDraft::default();
        for s in ["a", "b", "c", "d", "e"] {
            assert!(d.toggle_skill(s));
        }
        assert_eq!(d.skills.len(), 5);

        // Sixth selection is rejected, set unchanged.
        assert!(!d.toggle_skill("f"));
        assert_eq!(d.skills, vec!["a", "b", "c", "d", "e"]);

        // Deselecting frees a slot.
        assert!(d.toggle_skill("c"));
        assert!(d.toggle_skill("f"));
        assert_eq!(d.skills, vec!["a", "b", "d", "e", "f"]);
    }

    #[test]
    fn education_cleared_unless_college() {
        let mut d = ProfileDraft::default();
        d.education_level = Some(EducationLevel::HighSchoolGraduate);
        d.add_entry(EntryCategory::Education);

        d.clear_education_unless_college();
        assert!(d.education.is_empty());

        d.education_level = Some(EducationLevel::College);
        d.add_entry(EntryCategory::Education);
        d.clear_education_unless_college();
        assert_eq!(d.education.len(), 1);
    }

    #[test]
    fn education_level_roundtrip() {
        for level in [
            EducationLevel::HighSchoolCurrent,
            EducationLevel::HighSchoolGraduate,
            EducationLevel::College,
        ] {
            assert_eq!(EducationLevel::from_str_db(level.as_str()).unwrap(), level);
        }
        assert!(EducationLevel::from_str_db("postdoc").is_err());
    }
}
