//! Route definitions for the profile edit session.
//!
//! Mounted at `/profile` by `api_routes()`.
//!
//! ```text
//! POST   /session                             open_session
//! GET    /session                             get_session
//! DELETE /session                             close_session
//! PUT    /session/scalars                     update_scalars
//! POST   /session/entries/{category}          add_entry
//! PATCH  /session/entries/{category}/{index}  update_entry
//! DELETE /session/entries/{category}/{index}  remove_entry
//! POST   /session/skills/toggle               toggle_skill
//! POST   /session/save                        save_session
//! ```

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Profile edit session routes -- mounted at `/profile`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/session",
            get(profile::get_session)
                .post(profile::open_session)
                .delete(profile::close_session),
        )
        .route("/session/scalars", put(profile::update_scalars))
        .route("/session/entries/{category}", post(profile::add_entry))
        .route(
            "/session/entries/{category}/{index}",
            patch(profile::update_entry).delete(profile::remove_entry),
        )
        .route("/session/skills/toggle", post(profile::toggle_skill))
        .route("/session/save", post(profile::save_session))
}
