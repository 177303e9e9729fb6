//! Handlers for threads: the `/v1/threads` resource plus the named action
//! and read routes (`/thread_data/{id}`, `/new_thread`, `/edit_thread`,
//! `/upload_image`).

use agora_core::error::CoreError;
use agora_core::thread::ThreadLevel;
use agora_core::types::DbId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use agora_db::models::thread::{CreateThread, UpdateThread};
use agora_db::repositories::ThreadRepo;

use crate::error::{AppError, AppResult};
use crate::read_model::{self, ThreadDetailView, ThreadView};
use crate::state::AppState;
use crate::viewer::Viewer;

/// GET /v1/threads
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ThreadView>>> {
    let threads = ThreadRepo::list(&state.pool).await?;
    let mut views = Vec::with_capacity(threads.len());
    for thread in threads {
        views.push(read_model::thread_view(&state.pool, thread).await?);
    }
    Ok(Json(views))
}

/// GET /v1/threads/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ThreadView>> {
    let thread = ThreadRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Thread", id)))?;
    Ok(Json(read_model::thread_view(&state.pool, thread).await?))
}

/// POST /v1/threads and POST /new_thread
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateThread>,
) -> AppResult<(StatusCode, Json<ThreadView>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    if let Some(level) = &input.level {
        level.parse::<ThreadLevel>()?;
    }
    let thread = ThreadRepo::create(&state.pool, &input).await?;
    let view = read_model::thread_view(&state.pool, thread).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// PUT /v1/threads/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateThread>,
) -> AppResult<Json<ThreadView>> {
    if let Some(level) = &input.level {
        level.parse::<ThreadLevel>()?;
    }
    let thread = ThreadRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Thread", id)))?;
    Ok(Json(read_model::thread_view(&state.pool, thread).await?))
}

/// DELETE /v1/threads/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = ThreadRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Thread", id)))
    }
}

/// Body for POST /edit_thread.
#[derive(Debug, Deserialize)]
pub struct EditThreadRequest {
    pub thread_id: DbId,
    #[serde(flatten)]
    pub changes: UpdateThread,
}

/// POST /edit_thread
pub async fn edit(
    State(state): State<AppState>,
    Json(input): Json<EditThreadRequest>,
) -> AppResult<Json<ThreadView>> {
    if let Some(level) = &input.changes.level {
        level.parse::<ThreadLevel>()?;
    }
    let thread = ThreadRepo::update(&state.pool, input.thread_id, &input.changes)
        .await?
        .ok_or(AppError::Core(CoreError::not_found(
            "Thread",
            input.thread_id,
        )))?;
    Ok(Json(read_model::thread_view(&state.pool, thread).await?))
}

/// GET /thread_data/{thread_id}
///
/// The full thread detail: nested civis with scores, the contributor set,
/// and the viewer's past votes. Counts one view.
pub async fn thread_data(
    State(state): State<AppState>,
    Path(thread_id): Path<DbId>,
    viewer: Viewer,
) -> AppResult<Json<ThreadDetailView>> {
    let thread = ThreadRepo::find_by_id(&state.pool, thread_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Thread", thread_id)))?;

    ThreadRepo::increment_views(&state.pool, thread_id).await?;

    let viewer_profile = viewer.resolve(&state.pool).await?;
    let detail = read_model::thread_detail(&state.pool, thread, viewer_profile.as_ref()).await?;
    Ok(Json(detail))
}

/// Body for POST /upload_image (thread header image).
///
/// File handling is out of scope; the client supplies the hosted URL.
#[derive(Debug, Deserialize)]
pub struct ThreadImageRequest {
    pub thread_id: DbId,
    pub image_url: String,
}

/// POST /upload_image
pub async fn upload_image(
    State(state): State<AppState>,
    Json(input): Json<ThreadImageRequest>,
) -> AppResult<Json<ThreadView>> {
    let thread = ThreadRepo::set_image_url(&state.pool, input.thread_id, &input.image_url)
        .await?
        .ok_or(AppError::Core(CoreError::not_found(
            "Thread",
            input.thread_id,
        )))?;
    Ok(Json(read_model::thread_view(&state.pool, thread).await?))
}
