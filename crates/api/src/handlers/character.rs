//! Handlers for the `/characters` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use holocron_core::pagination::{clamp_limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use holocron_store::models::character::{
    Character, CharacterPage, CreateCharacter, UpdateCharacter,
};

use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Page size; clamped into `1..=MAX_PAGE_LIMIT`, defaulting to
    /// `DEFAULT_PAGE_LIMIT` when absent.
    pub limit: Option<i32>,
    /// Opaque cursor from the previous page's `lastKey`.
    #[serde(rename = "lastKey")]
    pub last_key: Option<String>,
}

/// POST /api/v1/characters
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCharacter>,
) -> AppResult<(StatusCode, Json<Character>)> {
    let character = state.service.create(input).await?;
    Ok((StatusCode::CREATED, Json(character)))
}

/// GET /api/v1/characters?limit=&lastKey=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<CharacterPage>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let page = state
        .service
        .list(limit, params.last_key.as_deref())
        .await?;
    Ok(Json(page))
}

/// GET /api/v1/characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Character>> {
    let character = state.service.get(&id).await?;
    Ok(Json(character))
}

/// PUT /api/v1/characters/{id}
///
/// Full overwrite of the mutable attributes: fields absent from the
/// body are cleared on the stored record, not preserved.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<UpdateCharacter>,
) -> AppResult<Json<Character>> {
    let character = state.service.update(&id, patch).await?;
    Ok(Json(character))
}

/// DELETE /api/v1/characters/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
