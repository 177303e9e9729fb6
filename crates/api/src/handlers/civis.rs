//! Handlers for civis: the `/v1/civis` resource plus the named action and
//! read routes (`/civi_data/{id}`, `/threads/{id}/civis`, `/response_data`,
//! `/new_civi`, `/edit_civi`, `/delete_civi`, `/rate_civi`,
//! `/upload_images`).

use agora_core::civi::{ActivityType, CiviType};
use agora_core::error::CoreError;
use agora_core::types::DbId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use agora_db::models::activity::CreateActivity;
use agora_db::models::civi::{CreateCivi, UpdateCivi};
use agora_db::models::civi_image::CreateCiviImage;
use agora_db::repositories::{ActivityRepo, CiviImageRepo, CiviRepo};

use crate::error::{AppError, AppResult};
use crate::read_model::{self, CiviImageView, CiviView};
use crate::state::AppState;
use crate::viewer::Viewer;

/// GET /v1/civis/{id} and GET /civi_data/{civi_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    viewer: Viewer,
) -> AppResult<Json<CiviView>> {
    let civi = CiviRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Civi", id)))?;
    let scored = viewer.resolve(&state.pool).await?.is_some();
    Ok(Json(read_model::civi_view(&state.pool, civi, scored).await?))
}

/// GET /threads/{thread_id}/civis
pub async fn list_by_thread(
    State(state): State<AppState>,
    Path(thread_id): Path<DbId>,
    viewer: Viewer,
) -> AppResult<Json<Vec<CiviView>>> {
    let scored = viewer.resolve(&state.pool).await?.is_some();
    let views = read_model::civis_for_thread(&state.pool, thread_id, scored).await?;
    Ok(Json(views))
}

/// GET /response_data/{thread_id}/{civi_id}
pub async fn list_responses(
    State(state): State<AppState>,
    Path((thread_id, civi_id)): Path<(DbId, DbId)>,
    viewer: Viewer,
) -> AppResult<Json<Vec<CiviView>>> {
    let scored = viewer.resolve(&state.pool).await?.is_some();
    let civis = CiviRepo::list_responses(&state.pool, thread_id, civi_id).await?;
    let mut views = Vec::with_capacity(civis.len());
    for civi in civis {
        views.push(read_model::civi_view(&state.pool, civi, scored).await?);
    }
    Ok(Json(views))
}

/// POST /v1/civis and POST /new_civi
pub async fn create(
    State(state): State<AppState>,
    viewer: Viewer,
    Json(input): Json<CreateCivi>,
) -> AppResult<(StatusCode, Json<CiviView>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    if let Some(c_type) = &input.c_type {
        c_type.parse::<CiviType>()?;
    }
    let civi = CiviRepo::create(&state.pool, &input).await?;
    let scored = viewer.resolve(&state.pool).await?.is_some();
    let view = read_model::civi_view(&state.pool, civi, scored).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Body for POST /edit_civi.
#[derive(Debug, Deserialize)]
pub struct EditCiviRequest {
    pub civi_id: DbId,
    #[serde(flatten)]
    pub changes: UpdateCivi,
}

/// POST /edit_civi and PUT /v1/civis/{id}
pub async fn edit(
    State(state): State<AppState>,
    viewer: Viewer,
    Json(input): Json<EditCiviRequest>,
) -> AppResult<Json<CiviView>> {
    if let Some(c_type) = &input.changes.c_type {
        c_type.parse::<CiviType>()?;
    }
    let civi = CiviRepo::update(&state.pool, input.civi_id, &input.changes)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Civi", input.civi_id)))?;
    let scored = viewer.resolve(&state.pool).await?.is_some();
    Ok(Json(read_model::civi_view(&state.pool, civi, scored).await?))
}

/// PUT /v1/civis/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    viewer: Viewer,
    Json(input): Json<UpdateCivi>,
) -> AppResult<Json<CiviView>> {
    if let Some(c_type) = &input.c_type {
        c_type.parse::<CiviType>()?;
    }
    let civi = CiviRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Civi", id)))?;
    let scored = viewer.resolve(&state.pool).await?.is_some();
    Ok(Json(read_model::civi_view(&state.pool, civi, scored).await?))
}

/// Body for POST /delete_civi.
#[derive(Debug, Deserialize)]
pub struct DeleteCiviRequest {
    pub civi_id: DbId,
}

/// POST /delete_civi
pub async fn delete_action(
    State(state): State<AppState>,
    Json(input): Json<DeleteCiviRequest>,
) -> AppResult<StatusCode> {
    delete_inner(&state, input.civi_id).await
}

/// DELETE /v1/civis/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    delete_inner(&state, id).await
}

async fn delete_inner(state: &AppState, id: DbId) -> AppResult<StatusCode> {
    let deleted = CiviRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Civi", id)))
    }
}

/// Body for POST /rate_civi.
#[derive(Debug, Deserialize)]
pub struct RateCiviRequest {
    pub civi_id: DbId,
    pub activity_type: ActivityType,
}

/// POST /rate_civi
///
/// Appends an activity record and recomputes the civi's stored tally.
/// The thread id is derived from the civi row, so an activity can never
/// reference a thread other than its civi's owner.
pub async fn rate(
    State(state): State<AppState>,
    viewer: Viewer,
    Json(input): Json<RateCiviRequest>,
) -> AppResult<(StatusCode, Json<CiviView>)> {
    let Some(profile) = viewer.resolve(&state.pool).await? else {
        return Err(AppError::BadRequest(
            "voting requires an X-Viewer-Id header identifying a profile".into(),
        ));
    };

    let civi = CiviRepo::find_by_id(&state.pool, input.civi_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Civi", input.civi_id)))?;

    ActivityRepo::create(
        &state.pool,
        &CreateActivity {
            account_id: profile.id,
            thread_id: civi.thread_id,
            civi_id: civi.id,
            activity_type: input.activity_type.as_str().to_string(),
        },
    )
    .await?;

    let civi = CiviRepo::recompute_tally(&state.pool, input.civi_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Civi", input.civi_id)))?;

    let view = read_model::civi_view(&state.pool, civi, true).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// POST /upload_images (civi attachment metadata)
///
/// File handling is out of scope; the client supplies the hosted URL.
pub async fn upload_images(
    State(state): State<AppState>,
    Json(input): Json<CreateCiviImage>,
) -> AppResult<(StatusCode, Json<CiviImageView>)> {
    let civi = CiviRepo::find_by_id(&state.pool, input.civi_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Civi", input.civi_id)))?;
    let image = CiviImageRepo::create(&state.pool, &input).await?;
    tracing::debug!(civi_id = civi.id, image_id = image.id, "Attached civi image");
    Ok((StatusCode::CREATED, Json(CiviImageView::from(&image))))
}
