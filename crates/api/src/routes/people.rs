//! Route definitions for the member directory.
//!
//! Mounted at `/people` by `api_routes()`.
//!
//! ```text
//! GET    /          list_people (?search=&subregion_id=&chapter_id=&skill=)
//! GET    /{id}      get_person
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::people;
use crate::state::AppState;

/// Directory routes -- mounted at `/people`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(people::list_people))
        .route("/{id}", get(people::get_person))
}
