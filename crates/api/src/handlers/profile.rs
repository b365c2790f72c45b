//! Handlers for the profile edit session.
//!
//! A session is opened from persisted data, mutated by discrete actions
//! (scalar patches, entry add/update/remove, skill toggles), and written
//! back through the reconciler-backed save path. The snapshot taken at
//! open time backs the unsaved-changes indicator; a successful save
//! re-baselines it.
//!
//! The onboarding wizard shares these mutation endpoints; it adds its own
//! navigation surface in [`super::onboarding`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use majlis_core::draft::{EntryCategory, ProfileDraft, ScalarPatch};
use majlis_core::error::CoreError;
use majlis_core::tracker;
use majlis_core::types::{EntryId, UserId};
use majlis_core::wizard::StepSequencer;
use majlis_db::models::user::User;
use majlis_db::repositories::UserRepo;
use majlis_db::sync;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::session::EditSession;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// The session as the editor sees it: the live draft plus the
/// change-tracker readout against the last-saved snapshot.
#[derive(Debug, Serialize)]
pub struct ProfileSessionView {
    pub draft: ProfileDraft,
    pub has_changes: bool,
    pub change_count: usize,
    pub is_saving: bool,
}

impl ProfileSessionView {
    pub(crate) fn of(session: &EditSession) -> Self {
        Self {
            has_changes: tracker::has_changes(&session.snapshot, &session.draft),
            change_count: tracker::change_count(&session.snapshot, &session.draft),
            draft: session.draft.clone(),
            is_saving: session.is_saving,
        }
    }
}

/// Verify the member row exists, returning it.
pub(crate) async fn ensure_user_exists(state: &AppState, id: UserId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: id.to_string(),
            })
        })
}

// ---------------------------------------------------------------------------
// POST /profile/session
// ---------------------------------------------------------------------------

/// Open (or re-open) an edit session from persisted data.
pub async fn open_session(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let user = ensure_user_exists(&state, auth.user_id).await?;
    let draft = sync::load_draft(&state.pool, &user).await?;

    state
        .sessions
        .open(auth.user_id, draft, StepSequencer::new())
        .await;
    let view = state
        .sessions
        .with(auth.user_id, |s| ProfileSessionView::of(s))
        .await?;

    tracing::info!(user_id = %auth.user_id, "Profile edit session opened");

    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

// ---------------------------------------------------------------------------
// GET /profile/session
// ---------------------------------------------------------------------------

/// Current draft and change summary.
pub async fn get_session(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let view = state
        .sessions
        .with(auth.user_id, |s| ProfileSessionView::of(s))
        .await?;
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// PUT /profile/session/scalars
// ---------------------------------------------------------------------------

/// Apply a multi-field scalar patch in one atomic action. A subregion
/// change cascades a reset of the dependent chapter selection.
pub async fn update_scalars(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(patch): Json<ScalarPatch>,
) -> AppResult<impl IntoResponse> {
    let view = state
        .sessions
        .with(auth.user_id, |s| {
            s.draft.apply_scalars(patch);
            ProfileSessionView::of(s)
        })
        .await?;
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// POST /profile/session/entries/{category}
// ---------------------------------------------------------------------------

/// Payload returned when an entry is added.
#[derive(Debug, Serialize)]
pub struct EntryAdded {
    pub id: EntryId,
    pub session: ProfileSessionView,
}

/// Append an empty entry to a category.
pub async fn add_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(category): Path<EntryCategory>,
) -> AppResult<impl IntoResponse> {
    let added = state
        .sessions
        .with(auth.user_id, |s| EntryAdded {
            id: s.draft.add_entry(category),
            session: ProfileSessionView::of(s),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: added })))
}

// ---------------------------------------------------------------------------
// PATCH /profile/session/entries/{category}/{index}
// ---------------------------------------------------------------------------

/// Merge a partial update onto the entry at `index`. An out-of-range
/// index is an explicit validation error, never a silent no-op.
pub async fn update_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((category, index)): Path<(EntryCategory, usize)>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let bad_patch = |e: serde_json::Error| {
        AppError::BadRequest(format!("Invalid {} entry patch: {e}", category.as_str()))
    };

    let result = state
        .sessions
        .with(auth.user_id, |s| -> AppResult<ProfileSessionView> {
            match category {
                EntryCategory::Roles => {
                    let patch = serde_json::from_value(body).map_err(bad_patch)?;
                    s.draft.update_role(index, patch)?;
                }
                EntryCategory::Projects => {
                    let patch = serde_json::from_value(body).map_err(bad_patch)?;
                    s.draft.update_project(index, patch)?;
                }
                EntryCategory::Education => {
                    let patch = serde_json::from_value(body).map_err(bad_patch)?;
                    s.draft.update_education(index, patch)?;
                }
            }
            Ok(ProfileSessionView::of(s))
        })
        .await?;

    Ok(Json(DataResponse { data: result? }))
}

// ---------------------------------------------------------------------------
// DELETE /profile/session/entries/{category}/{index}
// ---------------------------------------------------------------------------

/// Remove the entry at `index`, shifting later indices down.
pub async fn remove_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((category, index)): Path<(EntryCategory, usize)>,
) -> AppResult<impl IntoResponse> {
    let result = state
        .sessions
        .with(auth.user_id, |s| -> Result<ProfileSessionView, CoreError> {
            s.draft.remove_entry(category, index)?;
            Ok(ProfileSessionView::of(s))
        })
        .await?;
    Ok(Json(DataResponse { data: result? }))
}

// ---------------------------------------------------------------------------
// POST /profile/session/skills/toggle
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ToggleSkill {
    pub skill_id: String,
}

/// Outcome of a skill toggle. `applied` is false when a selection attempt
/// was rejected at the cap.
#[derive(Debug, Serialize)]
pub struct SkillToggled {
    pub applied: bool,
    pub session: ProfileSessionView,
}

/// Toggle a skill selection; selecting past the cap is a rejected no-op.
pub async fn toggle_skill(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ToggleSkill>,
) -> AppResult<impl IntoResponse> {
    let outcome = state
        .sessions
        .with(auth.user_id, |s| SkillToggled {
            applied: s.draft.toggle_skill(&body.skill_id),
            session: ProfileSessionView::of(s),
        })
        .await?;
    Ok(Json(DataResponse { data: outcome }))
}

// ---------------------------------------------------------------------------
// POST /profile/session/save
// ---------------------------------------------------------------------------

/// Summary of a completed save.
#[derive(Debug, Serialize)]
pub struct SaveSummary {
    pub roles_upserted: usize,
    pub projects_upserted: usize,
    pub education_upserted: usize,
    pub entries_deleted: usize,
    pub session: ProfileSessionView,
}

/// Persist the draft through the reconciler-backed save path.
///
/// Re-entrancy guarded: a save while one is in flight is rejected with a
/// conflict. On failure the draft and snapshot are untouched and the
/// error message is surfaced as-is.
pub async fn save_session(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let draft = state
        .sessions
        .begin_save(auth.user_id)
        .await
        .map_err(AppError::Core)?;

    match sync::save_draft(&state.pool, auth.user_id, &draft).await {
        Ok(report) => {
            state.sessions.finish_save(auth.user_id, Some(draft)).await;

            tracing::info!(
                user_id = %auth.user_id,
                roles = report.roles_upserted,
                projects = report.projects_upserted,
                education = report.education_upserted,
                deleted = report.entries_deleted,
                "Profile saved"
            );

            let view = state
                .sessions
                .with(auth.user_id, |s| ProfileSessionView::of(s))
                .await?;
            Ok(Json(DataResponse {
                data: SaveSummary {
                    roles_upserted: report.roles_upserted,
                    projects_upserted: report.projects_upserted,
                    education_upserted: report.education_upserted,
                    entries_deleted: report.entries_deleted,
                    session: view,
                },
            }))
        }
        Err(err) => {
            state.sessions.finish_save(auth.user_id, None).await;
            Err(AppError::Save(err))
        }
    }
}

// ---------------------------------------------------------------------------
// DELETE /profile/session
// ---------------------------------------------------------------------------

/// Discard the session without saving.
pub async fn close_session(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let existed = state.sessions.close(auth.user_id).await;
    tracing::debug!(user_id = %auth.user_id, existed, "Profile edit session closed");
    Ok(Json(DataResponse { data: existed }))
}
