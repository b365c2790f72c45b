//! Handlers for the onboarding wizard.
//!
//! The wizard runs on the same edit session as the profile editor (the
//! mutation endpoints live in [`super::profile`]); this module adds the
//! navigation surface. `advance` gates on the current step's validator
//! and persists that step's sections before moving; `back` and `goto`
//! move without gating, matching the editor's observed behavior. `complete`
//! is the terminal action: full validation sweep, reconciler-backed save,
//! completion stamp, session teardown -- in that order, aborting on the
//! first failure with everything intact.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use majlis_core::draft::ProfileDraft;
use majlis_core::error::CoreError;
use majlis_core::tracker;
use majlis_core::validate::{self, first_incomplete_step};
use majlis_core::wizard::{StepSequencer, WizardStep};
use majlis_db::sync;

use crate::error::{AppError, AppResult};
use crate::handlers::profile::ensure_user_exists;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::session::EditSession;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Views and params
// ---------------------------------------------------------------------------

/// The wizard as the client renders it.
#[derive(Debug, Serialize)]
pub struct WizardView {
    pub current_step: u8,
    pub current_label: &'static str,
    /// Whether the current step's validator passes right now.
    pub step_valid: bool,
    pub draft: ProfileDraft,
    pub has_changes: bool,
}

impl WizardView {
    fn of(session: &EditSession) -> Self {
        let step = session.sequencer.current();
        Self {
            current_step: step.to_number(),
            current_label: step.label(),
            step_valid: validate::validate_step(step, &session.draft).is_ok(),
            has_changes: tracker::has_changes(&session.snapshot, &session.draft),
            draft: session.draft.clone(),
        }
    }
}

/// Query parameters for opening the wizard. `step` is the untrusted
/// navigation parameter from the page address.
#[derive(Debug, Deserialize)]
pub struct OpenParams {
    pub step: Option<String>,
}

/// Body for explicit step jumps. The raw value is accepted as any JSON
/// scalar and parsed leniently; garbage input leaves the step unchanged.
#[derive(Debug, Deserialize)]
pub struct GotoBody {
    pub step: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// POST /onboarding/session
// ---------------------------------------------------------------------------

/// Open the wizard: load persisted data into a fresh session and position
/// the sequencer from the optional `?step=` parameter.
pub async fn open_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<OpenParams>,
) -> AppResult<impl IntoResponse> {
    let user = ensure_user_exists(&state, auth.user_id).await?;
    let draft = sync::load_draft(&state.pool, &user).await?;
    let resume_step = first_incomplete_step(&draft, user.onboarding_completed_at);

    let mut sequencer = StepSequencer::new();
    if let Some(raw) = &params.step {
        sequencer.go_to_param(raw);
    }

    state.sessions.open(auth.user_id, draft, sequencer).await;
    let view = state
        .sessions
        .with(auth.user_id, |s| WizardView::of(s))
        .await?;

    tracing::info!(
        user_id = %auth.user_id,
        step = view.current_step,
        resume_step,
        "Onboarding session opened"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

// ---------------------------------------------------------------------------
// GET /onboarding/session
// ---------------------------------------------------------------------------

/// Current wizard position, draft, and step validity.
pub async fn get_session(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let view = state
        .sessions
        .with(auth.user_id, |s| WizardView::of(s))
        .await?;
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/session/advance
// ---------------------------------------------------------------------------

/// Advance to the next step.
///
/// The current step's validator gates the move; on success that step's
/// sections are persisted before the sequencer advances. Leaving the
/// education step clears the entry list for non-college levels.
pub async fn advance(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let (step, draft) = state
        .sessions
        .with(auth.user_id, |s| {
            if s.sequencer.current() == WizardStep::Education {
                s.draft.clear_education_unless_college();
            }
            (s.sequencer.current(), s.draft.clone())
        })
        .await?;

    validate::validate_step(step, &draft).map_err(AppError::Core)?;
    persist_step(&state, auth.user_id, step, &draft).await?;

    let view = state
        .sessions
        .with(auth.user_id, |s| {
            s.sequencer.advance();
            WizardView::of(s)
        })
        .await?;

    tracing::info!(
        user_id = %auth.user_id,
        from_step = step.to_number(),
        to_step = view.current_step,
        "Onboarding advanced"
    );

    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/session/back
// ---------------------------------------------------------------------------

/// Go back one step. No validation gate; leaving the education step still
/// clears the entry list for non-college levels.
pub async fn back(State(state): State<AppState>, auth: AuthUser) -> AppResult<impl IntoResponse> {
    let view = state
        .sessions
        .with(auth.user_id, |s| {
            if s.sequencer.current() == WizardStep::Education {
                s.draft.clear_education_unless_college();
            }
            s.sequencer.back();
            WizardView::of(s)
        })
        .await?;
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/session/goto
// ---------------------------------------------------------------------------

/// Jump to a step. Out-of-range or non-numeric input is ignored and the
/// wizard stays on its current step; the response reports wherever it
/// ended up.
pub async fn goto(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<GotoBody>,
) -> AppResult<impl IntoResponse> {
    let raw = match &body.step {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    let view = state
        .sessions
        .with(auth.user_id, |s| {
            s.sequencer.go_to_param(&raw);
            WizardView::of(s)
        })
        .await?;
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/session/complete
// ---------------------------------------------------------------------------

/// Completion payload.
#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub completed: bool,
    /// Where the client should navigate after completion.
    pub redirect_to: &'static str,
}

/// Finish onboarding.
///
/// Requires the wizard to be on the final step, then runs every step's
/// validator (navigation allows jumping ahead, so this is the one place
/// cross-step enforcement happens), persists the full draft through the
/// reconciler-backed save path, stamps the completion flag, and discards
/// the session. Any failure aborts the flow with the session, draft, and
/// completion flag untouched, and the error is surfaced verbatim.
pub async fn complete(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let on_final = state
        .sessions
        .with(auth.user_id, |s| s.sequencer.current() == WizardStep::Finish)
        .await?;
    if !on_final {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Cannot complete onboarding before reaching step {}",
            WizardStep::MAX
        ))));
    }

    let draft = state
        .sessions
        .begin_save(auth.user_id)
        .await
        .map_err(AppError::Core)?;

    if let Err(err) = validate::validate_all_steps(&draft) {
        state.sessions.finish_save(auth.user_id, None).await;
        return Err(AppError::Core(err));
    }

    if let Err(err) = sync::save_draft(&state.pool, auth.user_id, &draft).await {
        state.sessions.finish_save(auth.user_id, None).await;
        return Err(AppError::Save(err));
    }

    if let Err(err) = majlis_db::repositories::UserRepo::mark_onboarding_complete(
        &state.pool,
        auth.user_id,
    )
    .await
    {
        state.sessions.finish_save(auth.user_id, None).await;
        return Err(AppError::Database(err));
    }

    state.sessions.finish_save(auth.user_id, Some(draft)).await;
    state.sessions.close(auth.user_id).await;

    tracing::info!(user_id = %auth.user_id, "Onboarding completed");

    Ok(Json(DataResponse {
        data: CompletionResponse {
            completed: true,
            redirect_to: "/home",
        },
    }))
}

// ---------------------------------------------------------------------------
// Per-step persistence
// ---------------------------------------------------------------------------

/// Persist the sections owned by one wizard step.
async fn persist_step(
    state: &AppState,
    user_id: majlis_core::types::UserId,
    step: WizardStep,
    draft: &ProfileDraft,
) -> AppResult<()> {
    match step {
        WizardStep::PersonalInfo => sync::save_personal_info(&state.pool, user_id, draft).await?,
        WizardStep::Location => sync::save_location(&state.pool, user_id, draft).await?,
        WizardStep::Roles => {
            sync::save_roles(&state.pool, user_id, &draft.roles).await?;
        }
        WizardStep::Projects => {
            sync::save_projects(&state.pool, user_id, &draft.projects).await?;
        }
        WizardStep::Education => {
            sync::save_education(&state.pool, user_id, draft).await?;
        }
        WizardStep::Skills => sync::save_skills(&state.pool, user_id, draft).await?,
        // The finish step owns no sections; `complete` does the work.
        WizardStep::Finish => {}
    }
    Ok(())
}
