//! Handlers for the `/v1/categories` resource.

use agora_core::error::CoreError;
use agora_core::types::DbId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use agora_db::models::category::{Category, CreateCategory};
use agora_db::repositories::{CategoryRepo, ProfileRepo};

use crate::error::{AppError, AppResult};
use crate::read_model::CategoryPrefView;
use crate::state::AppState;
use crate::viewer::Viewer;

/// GET /v1/categories
///
/// Each category carries a viewer-relative `preferred` flag. Anonymous
/// viewers (and viewer ids that resolve to nothing) see every category as
/// preferred, matching the pre-rewrite behavior.
pub async fn list(
    State(state): State<AppState>,
    viewer: Viewer,
) -> AppResult<Json<Vec<CategoryPrefView>>> {
    let categories = CategoryRepo::list(&state.pool).await?;

    let preferred_ids = match viewer.resolve(&state.pool).await? {
        Some(profile) => Some(ProfileRepo::preferred_category_ids(&state.pool, profile.id).await?),
        None => None,
    };

    let views = categories
        .iter()
        .map(|c| CategoryPrefView {
            id: c.id,
            name: c.name.clone(),
            preferred: preferred_ids
                .as_ref()
                .map_or(true, |ids| ids.contains(&c.id)),
        })
        .collect();
    Ok(Json(views))
}

/// GET /v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Category", id)))?;
    Ok(Json(category))
}

/// POST /v1/categories
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let category = CategoryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}
