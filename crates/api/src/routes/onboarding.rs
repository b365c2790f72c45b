//! Route definitions for the onboarding wizard.
//!
//! Mounted at `/onboarding` by `api_routes()`. Draft mutations go through
//! the `/profile/session` endpoints; the wizard adds navigation on top of
//! the same session.
//!
//! ```text
//! POST   /session              open_session (?step= untrusted param)
//! GET    /session              get_session
//! POST   /session/advance      advance (validator-gated, persists step)
//! POST   /session/back         back
//! POST   /session/goto         goto (lenient step parsing)
//! POST   /session/complete     complete (terminal action)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Onboarding wizard routes -- mounted at `/onboarding`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/session",
            get(onboarding::get_session).post(onboarding::open_session),
        )
        .route("/session/advance", post(onboarding::advance))
        .route("/session/back", post(onboarding::back))
        .route("/session/goto", post(onboarding::goto))
        .route("/session/complete", post(onboarding::complete))
}
