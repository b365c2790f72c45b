//! Handlers for the read-only reference data the editors select from.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use majlis_db::repositories::CatalogRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /catalog/subregions -- all subregions with region names.
pub async fn list_subregions(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let items = CatalogRepo::list_subregions(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /catalog/subregions/{id}/chapters -- chapters under a subregion.
pub async fn list_chapters(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(subregion_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let items = CatalogRepo::list_chapters_by_subregion(&state.pool, &subregion_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /catalog/role-types -- the role type catalog.
pub async fn list_role_types(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let items = CatalogRepo::list_role_types(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /catalog/skills -- the selectable skill list.
pub async fn list_skills(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let items = CatalogRepo::list_skills(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}
