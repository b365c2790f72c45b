//! Change tracking between the persisted snapshot and the live draft.
//!
//! `change_count` is deliberately coarse: it reports how many *sections*
//! diverged, not how many fields. Editing three fields inside one role
//! entry is still one change, because the count feeds a "N unsaved
//! changes" indicator, not an audit log.

use crate::draft::ProfileDraft;

/// Whether the draft differs from the snapshot in any way, including
/// entry order and entry content.
pub fn has_changes(original: &ProfileDraft, current: &ProfileDraft) -> bool {
    original != current
}

/// Count divergent sections: each scalar field that differs counts one,
/// and each of the four entry-list sections counts at most one no matter
/// how much of the list changed.
pub fn change_count(original: &ProfileDraft, current: &ProfileDraft) -> usize {
    let mut count = 0;

    // Scalar fields, one each.
    count += usize::from(original.phone != current.phone);
    count += usize::from(original.personal_email != current.personal_email);
    count += usize::from(original.ethnicity != current.ethnicity);
    count += usize::from(original.birth_date != current.birth_date);
    count += usize::from(original.subregion_id != current.subregion_id);
    count += usize::from(original.chapter_id != current.chapter_id);
    count += usize::from(original.education_level != current.education_level);

    // List sections, at most one each.
    count += usize::from(original.roles != current.roles);
    count += usize::from(original.projects != current.projects);
    count += usize::from(original.education != current.education);
    count += usize::from(original.skills != current.skills);

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::EntryCategory;
    use crate::entry::RoleEntryPatch;

    fn sample() -> ProfileDraft {
        let mut d = ProfileDraft {
            phone: Some("5551234567".into()),
            personal_email: Some("a@b.c".into()),
            skills: vec!["a".into(), "b".into(), "c".into()],
            ..Default::default()
        };
        d.add_entry(EntryCategory::Roles);
        d
    }

    #[test]
    fn identical_drafts_have_no_changes() {
        let d = sample();
        assert!(!has_changes(&d, &d));
        assert_eq!(change_count(&d, &d), 0);

        let copy = d.clone();
        assert!(!has_changes(&d, &copy));
        assert_eq!(change_count(&d, &copy), 0);
    }

    #[test]
    fn one_scalar_difference_counts_one() {
        let original = sample();
        let mut current = original.clone();
        current.phone = Some("5559876543".into());

        assert!(has_changes(&original, &current));
        assert_eq!(change_count(&original, &current), 1);
    }

    #[test]
    fn adding_an_entry_counts_one_for_the_section() {
        let original = sample();
        let mut current = original.clone();
        current.add_entry(EntryCategory::Roles);

        // Length and content both changed; still one section.
        assert_eq!(change_count(&original, &current), 1);
    }

    #[test]
    fn many_edits_in_one_entry_still_count_one() {
        let original = sample();
        let mut current = original.clone();
        current
            .update_role(
                0,
                RoleEntryPatch {
                    is_current: Some(true),
                    notes: Some(Some("three".into())),
                    start: Some(Some(crate::entry::MonthYear::new(2, 2020))),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(change_count(&original, &current), 1);
    }

    #[test]
    fn entry_order_matters_for_has_changes() {
        let mut original = sample();
        original.add_entry(EntryCategory::Roles);
        let mut current = original.clone();
        current.roles.swap(0, 1);

        assert!(has_changes(&original, &current));
        assert_eq!(change_count(&original, &current), 1);
    }

    #[test]
    fn scalar_and_section_changes_sum() {
        let original = sample();
        let mut current = original.clone();
        current.ethnicity = Some("Sudanese".into());
        current.skills.pop();
        current.add_entry(EntryCategory::Projects);

        assert_eq!(change_count(&original, &current), 3);
    }
}
