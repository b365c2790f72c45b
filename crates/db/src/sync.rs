//! Loading a profile draft from the database and writing one back.
//!
//! Two write granularities share the same plumbing:
//!
//! - `save_draft` writes everything (scalars, all three entry categories,
//!   membership) and is used by the profile editor's save and the
//!   onboarding completion flow.
//! - `save_personal_info` / `save_location` / `save_roles` /
//!   `save_projects` / `save_education` / `save_skills` each write one
//!   wizard step's sections and back the step-by-step advance path.
//!
//! Entry categories always go through the core reconciler; swallowed
//! delete-phase leftovers are logged here.

use majlis_core::draft::ProfileDraft;
use majlis_core::entry::{Keyed, ProjectEntry, RoleEntry};
use majlis_core::error::CoreError;
use majlis_core::reconcile::{reconcile, EntryStore, ReconcileOutcome};
use majlis_core::types::UserId;

use crate::models::user::{ProfileScalars, User};
use crate::repositories::{
    EducationRecordRepo, MemberProjectRepo, MembershipRepo, RoleAssignmentRepo, UserRepo,
};
use crate::stores::{EducationRecordStore, MemberProjectStore, RoleAssignmentStore};
use crate::DbPool;

/// A save failure, tagged with the section that failed so the surfaced
/// message tells the member what did not stick.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Failed to save profile: {0}")]
    Scalars(sqlx::Error),

    #[error("Failed to save {section}: {source}")]
    Section {
        section: &'static str,
        source: CoreError,
    },

    #[error("Failed to save location: {0}")]
    Membership(sqlx::Error),

    #[error("User profile not found")]
    UserMissing,
}

/// Counts of what a successful save wrote.
#[derive(Debug, Default)]
pub struct SaveReport {
    pub roles_upserted: usize,
    pub projects_upserted: usize,
    pub education_upserted: usize,
    pub entries_deleted: usize,
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Assemble a [`ProfileDraft`] from the persisted tables.
pub async fn load_draft(pool: &DbPool, user: &User) -> Result<ProfileDraft, sqlx::Error> {
    let membership = MembershipRepo::find_active_by_user(pool, user.id).await?;

    // The membership stores only the chapter; resolve its subregion for
    // the dependent-selection pair the location step edits.
    let mut subregion_id = None;
    let mut chapter_id = None;
    if let Some(m) = membership {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT subregion_id FROM chapters WHERE id = $1")
                .bind(&m.chapter_id)
                .fetch_optional(pool)
                .await?;
        subregion_id = row.map(|r| r.0);
        chapter_id = Some(m.chapter_id);
    }

    let roles = RoleAssignmentRepo::list_by_user(pool, user.id).await?;
    let projects = MemberProjectRepo::list_by_user(pool, user.id).await?;
    let education = EducationRecordRepo::list_by_user(pool, user.id).await?;

    Ok(ProfileDraft {
        phone: user.phone.clone(),
        personal_email: user.personal_email.clone(),
        ethnicity: user.ethnicity.clone(),
        birth_date: user.date_of_birth,
        subregion_id,
        chapter_id,
        education_level: user.education_level(),
        roles: roles.into_iter().map(Into::into).collect(),
        projects: projects.into_iter().map(Into::into).collect(),
        education: education.into_iter().map(Into::into).collect(),
        skills: user.skills.clone(),
    })
}

// ---------------------------------------------------------------------------
// Section writes
// ---------------------------------------------------------------------------

/// Reconcile one entry category, logging (not raising) a swallowed
/// delete-phase failure.
async fn reconcile_section<T, S>(
    store: &S,
    owner: UserId,
    section: &'static str,
    entries: &[T],
) -> Result<ReconcileOutcome, SaveError>
where
    T: Keyed + Clone + Send + Sync,
    S: EntryStore<T>,
{
    let outcome = reconcile(store, owner, entries)
        .await
        .map_err(|source| SaveError::Section { section, source })?;

    if let Some(err) = &outcome.delete_error {
        // Deliberately non-fatal: the upsert succeeded, so nothing was
        // lost. The stale rows are swept again on the next save.
        tracing::warn!(
            user_id = %owner,
            section,
            error = %err,
            "Delete of removed entries failed after successful upsert"
        );
    }
    Ok(outcome)
}

/// Step 1: the personal contact fields on the user row.
pub async fn save_personal_info(
    pool: &DbPool,
    owner: UserId,
    draft: &ProfileDraft,
) -> Result<(), SaveError> {
    UserRepo::update_personal_info(
        pool,
        owner,
        draft.phone.as_deref(),
        draft.personal_email.as_deref(),
        draft.ethnicity.as_deref(),
        draft.birth_date,
    )
    .await
    .map_err(SaveError::Scalars)?
    .ok_or(SaveError::UserMissing)?;
    Ok(())
}

/// Step 2: point the active membership at the chosen chapter. A draft
/// with no chapter selected saves nothing.
pub async fn save_location(
    pool: &DbPool,
    owner: UserId,
    draft: &ProfileDraft,
) -> Result<(), SaveError> {
    if let Some(chapter_id) = &draft.chapter_id {
        MembershipRepo::upsert_active(pool, owner, chapter_id)
            .await
            .map_err(SaveError::Membership)?;
    }
    Ok(())
}

/// Step 3: reconcile the role assignment list.
pub async fn save_roles(
    pool: &DbPool,
    owner: UserId,
    roles: &[RoleEntry],
) -> Result<ReconcileOutcome, SaveError> {
    let store = RoleAssignmentStore::new(pool.clone());
    reconcile_section(&store, owner, "roles", roles).await
}

/// Step 4: reconcile the project list.
pub async fn save_projects(
    pool: &DbPool,
    owner: UserId,
    projects: &[ProjectEntry],
) -> Result<ReconcileOutcome, SaveError> {
    let store = MemberProjectStore::new(pool.clone());
    reconcile_section(&store, owner, "projects", projects).await
}

/// Step 5: the education level plus the reconciled record list. Callers
/// must have already cleared the list for non-college levels.
pub async fn save_education(
    pool: &DbPool,
    owner: UserId,
    draft: &ProfileDraft,
) -> Result<ReconcileOutcome, SaveError> {
    UserRepo::update_education_level(pool, owner, draft.education_level.map(|l| l.as_str()))
        .await
        .map_err(SaveError::Scalars)?;

    let store = EducationRecordStore::new(pool.clone());
    reconcile_section(&store, owner, "education", &draft.education).await
}

/// Step 6: the selected skill set.
pub async fn save_skills(
    pool: &DbPool,
    owner: UserId,
    draft: &ProfileDraft,
) -> Result<(), SaveError> {
    UserRepo::update_skills(pool, owner, &draft.skills)
        .await
        .map_err(SaveError::Scalars)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Full save
// ---------------------------------------------------------------------------

/// Write a draft back to the database in full.
///
/// The draft is normalized first: the education list is dropped unless
/// the level is college, and ongoing entries shed their end dates via the
/// row conversions. Writes run scalar-first, then the three reconciles,
/// then the membership; the first fatal error aborts and is returned as a
/// single message.
pub async fn save_draft(
    pool: &DbPool,
    owner: UserId,
    draft: &ProfileDraft,
) -> Result<SaveReport, SaveError> {
    let mut draft = draft.clone();
    draft.clear_education_unless_college();

    let scalars = ProfileScalars::from_draft(&draft);
    UserRepo::update_profile_scalars(pool, owner, &scalars)
        .await
        .map_err(SaveError::Scalars)?
        .ok_or(SaveError::UserMissing)?;

    let mut report = SaveReport::default();

    let outcome = save_roles(pool, owner, &draft.roles).await?;
    report.roles_upserted = outcome.upserted;
    report.entries_deleted += outcome.deleted;

    let outcome = save_projects(pool, owner, &draft.projects).await?;
    report.projects_upserted = outcome.upserted;
    report.entries_deleted += outcome.deleted;

    let store = EducationRecordStore::new(pool.clone());
    let outcome = reconcile_section(&store, owner, "education", &draft.education).await?;
    report.education_upserted = outcome.upserted;
    report.entries_deleted += outcome.deleted;

    save_location(pool, owner, &draft).await?;

    tracing::debug!(
        user_id = %owner,
        roles = report.roles_upserted,
        projects = report.projects_upserted,
        education = report.education_upserted,
        deleted = report.entries_deleted,
        "Profile draft saved"
    );

    Ok(report)
}
