//! Handlers for the member directory.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use majlis_core::error::CoreError;
use majlis_core::types::UserId;
use majlis_db::models::person::DirectoryFilter;
use majlis_db::repositories::PeopleRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::response::DataResponse;
use crate::state::AppState;

/// Directory filters and pagination
/// (`?search=&subregion_id=&chapter_id=&skill=&limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct DirectoryParams {
    pub search: Option<String>,
    pub subregion_id: Option<String>,
    pub chapter_id: Option<String>,
    pub skill: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// GET /people
// ---------------------------------------------------------------------------

/// List completed-onboarding members matching the filters.
pub async fn list_people(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<DirectoryParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let filter = DirectoryFilter {
        search: params.search,
        subregion_id: params.subregion_id,
        chapter_id: params.chapter_id,
        skill: params.skill,
    };

    let items = PeopleRepo::list(&state.pool, &filter, limit, offset).await?;

    tracing::debug!(count = items.len(), "Listed directory members");

    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /people/{id}
// ---------------------------------------------------------------------------

/// One member's directory profile.
pub async fn get_person(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<UserId>,
) -> AppResult<impl IntoResponse> {
    let person = PeopleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Member",
                id: id.to_string(),
            })
        })?;
    Ok(Json(DataResponse { data: person }))
}
