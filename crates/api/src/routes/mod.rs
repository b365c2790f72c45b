pub mod auth;
pub mod catalog;
pub mod health;
pub mod onboarding;
pub mod people;
pub mod profile;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth          sign-in
/// /catalog       reference data (subregions, chapters, role types, skills)
/// /profile       profile edit session
/// /onboarding    wizard navigation (shares the profile session)
/// /people        member directory
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/catalog", catalog::router())
        .nest("/profile", profile::router())
        .nest("/onboarding", onboarding::router())
        .nest("/people", people::router())
}
