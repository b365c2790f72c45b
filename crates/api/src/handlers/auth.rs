//! Sign-in handler.
//!
//! The identity provider (Google sign-in) is an external collaborator:
//! by the time a request reaches this handler the token has been
//! verified upstream and we receive the resulting identity payload. This
//! handler applies the organization's domain restriction, finds or
//! creates the member row, and issues an access token.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use majlis_core::auth::is_allowed_domain;
use majlis_core::error::CoreError;
use majlis_core::validate::first_incomplete_step;
use majlis_db::models::user::{CreateUser, User, UserResponse};
use majlis_db::repositories::UserRepo;
use majlis_db::sync;

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// A provider-verified identity, received from the auth callback.
#[derive(Debug, Deserialize)]
pub struct VerifiedIdentity {
    /// Opaque subject id from the identity provider.
    pub external_id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Successful sign-in payload.
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub user: UserResponse,
    pub onboarding_complete: bool,
    /// Wizard step to resume at; 0 when onboarding is already complete.
    pub resume_step: u8,
}

// ---------------------------------------------------------------------------
// POST /auth/google
// ---------------------------------------------------------------------------

/// Exchange a verified identity for an access token, creating the member
/// row on first sign-in. Identities outside the allowed email domain are
/// rejected.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(identity): Json<VerifiedIdentity>,
) -> AppResult<impl IntoResponse> {
    let domain = &state.config.allowed_email_domain;
    if !is_allowed_domain(&identity.email, domain) {
        tracing::warn!(email = %identity.email, "Sign-in rejected: email outside allowed domain");
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Sign-in is restricted to @{domain} accounts"
        ))));
    }

    let (user, created) = find_or_create_user(&state, &identity).await?;

    let draft = sync::load_draft(&state.pool, &user).await?;
    let resume_step = first_incomplete_step(&draft, user.onboarding_completed_at);

    let token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Failed to issue token: {e}")))?;

    tracing::info!(
        user_id = %user.id,
        created,
        resume_step,
        "Member signed in"
    );

    let response = SignInResponse {
        token,
        onboarding_complete: user.onboarding_completed_at.is_some(),
        resume_step,
        user: UserResponse::from(&user),
    };

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: response })))
}

/// Look up the member by provider subject, creating the row on first
/// sign-in. Returns the row and whether it was just created.
async fn find_or_create_user(
    state: &AppState,
    identity: &VerifiedIdentity,
) -> AppResult<(User, bool)> {
    if let Some(user) = UserRepo::find_by_auth_subject(&state.pool, &identity.external_id).await? {
        return Ok((user, false));
    }

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            auth_subject: identity.external_id.clone(),
            email: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
        },
    )
    .await?;

    Ok((user, true))
}
