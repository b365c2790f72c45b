//! Route definitions for reference data.
//!
//! Mounted at `/catalog` by `api_routes()`.
//!
//! ```text
//! GET    /subregions                     list_subregions
//! GET    /subregions/{id}/chapters       list_chapters
//! GET    /role-types                     list_role_types
//! GET    /skills                         list_skills
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes -- mounted at `/catalog`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subregions", get(catalog::list_subregions))
        .route("/subregions/{id}/chapters", get(catalog::list_chapters))
        .route("/role-types", get(catalog::list_role_types))
        .route("/skills", get(catalog::list_skills))
}
