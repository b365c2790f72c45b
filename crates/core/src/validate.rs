//! Per-step completeness validators.
//!
//! These predicates gate "next" in the onboarding wizard and "save" in the
//! profile editor. Each returns a descriptive [`CoreError::Validation`] on
//! failure so the message can be surfaced inline.

use std::sync::OnceLock;

use regex::Regex;

use crate::draft::{EducationLevel, ProfileDraft, SKILLS_MAX, SKILLS_MIN};
use crate::entry::{EducationEntry, ProjectEntry, RoleEntry};
use crate::error::CoreError;
use crate::types::Timestamp;
use crate::wizard::WizardStep;

/// Number of digits a US phone number must reduce to.
const PHONE_DIGITS: usize = 10;

/// Permissive email shape: something@something.something, no whitespace.
/// Deliberately not RFC validation; the goal is catching obvious typos.
fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

/// Strip formatting from a phone number, keeping digits only.
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// A phone number is valid when it reduces to exactly 10 digits.
pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    let digits = phone_digits(phone);
    if digits.len() == PHONE_DIGITS {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Phone number must contain exactly {PHONE_DIGITS} digits (got {})",
            digits.len()
        )))
    }
}

/// An email is valid when it matches the permissive `local@domain.tld`
/// shape.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email_pattern().is_match(email) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

// ---------------------------------------------------------------------------
// Step validators
// ---------------------------------------------------------------------------

/// Step 1: phone, personal email, ethnicity, and birth date all required.
pub fn validate_personal_info(draft: &ProfileDraft) -> Result<(), CoreError> {
    let phone = draft
        .phone
        .as_deref()
        .ok_or_else(|| CoreError::Validation("Phone number is required".to_string()))?;
    validate_phone(phone)?;

    let email = draft
        .personal_email
        .as_deref()
        .ok_or_else(|| CoreError::Validation("Personal email is required".to_string()))?;
    validate_email(email)?;

    if draft.ethnicity.as_deref().is_none_or(str::is_empty) {
        return Err(CoreError::Validation("Ethnicity is required".to_string()));
    }
    if draft.birth_date.is_none() {
        return Err(CoreError::Validation(
            "Date of birth is required".to_string(),
        ));
    }
    Ok(())
}

/// Step 2: both the subregion and the chapter selection required.
pub fn validate_location(draft: &ProfileDraft) -> Result<(), CoreError> {
    if draft.subregion_id.as_deref().is_none_or(str::is_empty) {
        return Err(CoreError::Validation("Select a subregion".to_string()));
    }
    if draft.chapter_id.as_deref().is_none_or(str::is_empty) {
        return Err(CoreError::Validation("Select a chapter".to_string()));
    }
    Ok(())
}

/// A role entry is complete when a role type is chosen (catalog or custom)
/// and the start month and year are set. End date, ongoing flag, mentor,
/// and notes are never required.
pub fn role_entry_complete(entry: &RoleEntry) -> bool {
    entry.role_type.is_set() && entry.start.is_some()
}

/// Step 3: at least one role entry, every entry complete.
pub fn validate_roles(draft: &ProfileDraft) -> Result<(), CoreError> {
    if draft.roles.is_empty() {
        return Err(CoreError::Validation(
            "Add at least one role you have held".to_string(),
        ));
    }
    if draft.roles.iter().all(role_entry_complete) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Each role needs a role type and a start date".to_string(),
        ))
    }
}

/// A project entry is complete under the same rule as a role entry.
pub fn project_entry_complete(entry: &ProjectEntry) -> bool {
    entry.project_type.is_set() && entry.start.is_some()
}

/// Step 4: at least one project entry, every entry complete.
pub fn validate_projects(draft: &ProfileDraft) -> Result<(), CoreError> {
    if draft.projects.is_empty() {
        return Err(CoreError::Validation(
            "Add at least one project you have worked on".to_string(),
        ));
    }
    if draft.projects.iter().all(project_entry_complete) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Each project needs a project type and a start date".to_string(),
        ))
    }
}

/// An education entry is complete when the school is chosen, a degree type
/// is set, the field of study is non-empty after trimming, and the
/// graduation year is set.
pub fn education_entry_complete(entry: &EducationEntry) -> bool {
    entry.school.is_set()
        && entry.degree_type.is_some()
        && entry
            .field_of_study
            .as_deref()
            .is_some_and(|f| !f.trim().is_empty())
        && entry.graduation_year.is_some()
}

/// Step 5: a level is always required; only the college level additionally
/// requires a complete education entry. Non-college levels ignore the
/// entry list entirely (it is cleared separately on step exit).
pub fn validate_education(draft: &ProfileDraft) -> Result<(), CoreError> {
    let Some(level) = draft.education_level else {
        return Err(CoreError::Validation(
            "Select your education level".to_string(),
        ));
    };
    if level != EducationLevel::College {
        return Ok(());
    }
    if draft.education.iter().any(education_entry_complete) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Add a school with degree, field of study, and graduation year".to_string(),
        ))
    }
}

/// Step 6: between 3 and 5 skills selected, inclusive.
pub fn validate_skills(draft: &ProfileDraft) -> Result<(), CoreError> {
    let n = draft.skills.len();
    if (SKILLS_MIN..=SKILLS_MAX).contains(&n) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Select between {SKILLS_MIN} and {SKILLS_MAX} skills ({n} selected)"
        )))
    }
}

/// Validate the draft sections owned by a wizard step. The finish step has
/// no predicate of its own.
pub fn validate_step(step: WizardStep, draft: &ProfileDraft) -> Result<(), CoreError> {
    match step {
        WizardStep::PersonalInfo => validate_personal_info(draft),
        WizardStep::Location => validate_location(draft),
        WizardStep::Roles => validate_roles(draft),
        WizardStep::Projects => validate_projects(draft),
        WizardStep::Education => validate_education(draft),
        WizardStep::Skills => validate_skills(draft),
        WizardStep::Finish => Ok(()),
    }
}

/// Validate every step that carries a predicate. Used by the completion
/// path so a member who jumped ahead cannot finalize an invalid profile.
pub fn validate_all_steps(draft: &ProfileDraft) -> Result<(), CoreError> {
    for n in WizardStep::MIN..=WizardStep::MAX {
        let step = WizardStep::from_number(n).expect("step range");
        validate_step(step, draft)?;
    }
    Ok(())
}

/// The step a returning member should resume at: 0 when onboarding is
/// already complete, otherwise the first step whose required data is
/// missing (personal info, roles, and projects are resumable but never
/// block resumption on their own).
pub fn first_incomplete_step(draft: &ProfileDraft, completed_at: Option<Timestamp>) -> u8 {
    if completed_at.is_some() {
        return 0;
    }
    if draft.chapter_id.is_none() {
        return WizardStep::Location.to_number();
    }
    if draft.education_level.is_none() {
        return WizardStep::Education.to_number();
    }
    if draft.skills.len() < SKILLS_MIN {
        return WizardStep::Skills.to_number();
    }
    WizardStep::Finish.to_number()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::Choice;
    use crate::draft::EntryCategory;
    use crate::entry::MonthYear;
    use chrono::NaiveDate;

    fn complete_personal() -> ProfileDraft {
        ProfileDraft {
            phone: Some("(555) 123-4567".into()),
            personal_email: Some("someone@example.org".into()),
            ethnicity: Some("Pakistani".into()),
            birth_date: NaiveDate::from_ymd_opt(2000, 4, 2),
            ..Default::default()
        }
    }

    // -- phone --

    #[test]
    fn phone_ten_digits_passes() {
        assert!(validate_phone("5551234567").is_ok());
        assert!(validate_phone("(555) 123-4567").is_ok());
    }

    #[test]
    fn phone_wrong_length_fails_with_digit_count() {
        let err = validate_phone("555123").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("10 digits"), "message was: {msg}");
        assert!(msg.contains("got 6"), "message was: {msg}");
    }

    // -- email --

    #[test]
    fn email_shape() {
        assert!(validate_email("a@b.c").is_ok());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a b@c.d").is_err());
        assert!(validate_email("@b.c").is_err());
    }

    // -- personal info --

    #[test]
    fn personal_info_requires_all_four() {
        assert!(validate_personal_info(&complete_personal()).is_ok());

        let mut d = complete_personal();
        d.ethnicity = Some("".into());
        assert!(validate_personal_info(&d).is_err());

        let mut d = complete_personal();
        d.birth_date = None;
        assert!(validate_personal_info(&d).is_err());

        let mut d = complete_personal();
        d.phone = Some("555123".into());
        assert!(validate_personal_info(&d).is_err());
    }

    // -- location --

    #[test]
    fn location_requires_both_selections() {
        let mut d = ProfileDraft::default();
        assert!(validate_location(&d).is_err());

        d.subregion_id = Some("houston".into());
        assert!(validate_location(&d).is_err());

        d.chapter_id = Some("katy".into());
        assert!(validate_location(&d).is_ok());
    }

    // -- roles / projects --

    fn complete_role() -> RoleEntry {
        let mut e = RoleEntry::new();
        e.role_type = Choice::choose_existing("nnc", None);
        e.start = Some(MonthYear::new(9, 2022));
        e
    }

    #[test]
    fn role_entry_needs_type_and_start() {
        let mut e = RoleEntry::new();
        assert!(!role_entry_complete(&e));

        e.role_type = Choice::choose_custom("Volunteer lead");
        assert!(!role_entry_complete(&e));

        e.start = Some(MonthYear::new(1, 2020));
        assert!(role_entry_complete(&e));

        // End date, mentor, notes never required.
        assert!(e.end.is_none() && e.mentor == Choice::None && e.notes.is_none());
    }

    #[test]
    fn roles_step_requires_nonempty_all_valid() {
        let mut d = ProfileDraft::default();
        assert!(validate_roles(&d).is_err());

        d.roles.push(complete_role());
        assert!(validate_roles(&d).is_ok());

        d.add_entry(EntryCategory::Roles); // incomplete entry
        assert!(validate_roles(&d).is_err());
    }

    // -- education --

    fn complete_education() -> EducationEntry {
        let mut e = EducationEntry::new();
        e.school = Choice::choose_custom("State University");
        e.degree_type = Some("bachelors".into());
        e.field_of_study = Some("Biology".into());
        e.graduation_year = Some(2024);
        e
    }

    #[test]
    fn education_level_always_required() {
        let d = ProfileDraft::default();
        assert!(validate_education(&d).is_err());
    }

    #[test]
    fn non_college_ignores_entries() {
        let mut d = ProfileDraft::default();
        d.education_level = Some(EducationLevel::HighSchoolCurrent);
        // Incomplete entries present; irrelevant for non-college.
        d.add_entry(EntryCategory::Education);
        assert!(validate_education(&d).is_ok());
    }

    #[test]
    fn college_requires_one_complete_entry() {
        let mut d = ProfileDraft::default();
        d.education_level = Some(EducationLevel::College);
        assert!(validate_education(&d).is_err());

        d.add_entry(EntryCategory::Education);
        assert!(validate_education(&d).is_err());

        d.education.push(complete_education());
        assert!(validate_education(&d).is_ok());

        let mut blank_field = complete_education();
        blank_field.field_of_study = Some("   ".into());
        let mut d = ProfileDraft {
            education_level: Some(EducationLevel::College),
            education: vec![blank_field],
            ..Default::default()
        };
        assert!(validate_education(&d).is_err());
        d.education[0].field_of_study = Some("History".into());
        assert!(validate_education(&d).is_ok());
    }

    // -- skills --

    #[test]
    fn skills_count_bounds() {
        let mut d = ProfileDraft::default();
        d.skills = vec!["a".into(), "b".into()];
        assert!(validate_skills(&d).is_err());

        d.skills.push("c".into());
        assert!(validate_skills(&d).is_ok());

        d.skills.extend(["d".into(), "e".into()]);
        assert!(validate_skills(&d).is_ok());

        d.skills.push("f".into());
        assert!(validate_skills(&d).is_err());
    }

    // -- resume step --

    #[test]
    fn resume_step_zero_when_complete() {
        let d = ProfileDraft::default();
        assert_eq!(first_incomplete_step(&d, Some(chrono::Utc::now())), 0);
    }

    #[test]
    fn resume_step_walks_required_fields() {
        let mut d = ProfileDraft::default();
        assert_eq!(first_incomplete_step(&d, None), 2);

        d.subregion_id = Some("houston".into());
        d.chapter_id = Some("katy".into());
        assert_eq!(first_incomplete_step(&d, None), 5);

        d.education_level = Some(EducationLevel::HighSchoolGraduate);
        assert_eq!(first_incomplete_step(&d, None), 6);

        d.skills = vec!["a".into(), "b".into(), "c".into()];
        assert_eq!(first_incomplete_step(&d, None), 7);
    }
}
