//! Route definitions for sign-in.
//!
//! Mounted at `/auth` by `api_routes()`.
//!
//! ```text
//! POST   /google      sign_in (verified identity -> access token)
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Auth routes -- mounted at `/auth`.
pub fn router() -> Router<AppState> {
    Router::new().route("/google", post(auth::sign_in))
}
