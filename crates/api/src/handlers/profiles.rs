//! Handlers for the `/v1/accounts` resource.

use agora_core::error::CoreError;
use agora_core::types::DbId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use agora_db::models::profile::{CreateProfile, Profile, UpdateProfile};
use agora_db::repositories::{CategoryRepo, ProfileRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /v1/accounts
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Profile>>> {
    Ok(Json(ProfileRepo::list(&state.pool).await?))
}

/// GET /v1/accounts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Profile>> {
    let profile = ProfileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Profile", id)))?;
    Ok(Json(profile))
}

/// POST /v1/accounts
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProfile>,
) -> AppResult<(StatusCode, Json<Profile>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let profile = ProfileRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Body for POST /v1/accounts/{id}/categories.
#[derive(Debug, Deserialize)]
pub struct PreferCategoryRequest {
    pub category_id: DbId,
}

/// POST /v1/accounts/{id}/categories
///
/// Mark a category as preferred for a profile. Idempotent.
pub async fn prefer_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PreferCategoryRequest>,
) -> AppResult<StatusCode> {
    ProfileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Profile", id)))?;
    CategoryRepo::find_by_id(&state.pool, input.category_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found(
            "Category",
            input.category_id,
        )))?;
    ProfileRepo::prefer_category(&state.pool, id, input.category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /v1/accounts/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<Profile>> {
    let profile = ProfileRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Profile", id)))?;
    Ok(Json(profile))
}
