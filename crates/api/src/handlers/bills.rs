//! Handlers for the `/v1/bills` resource and the enrichment updater.
//!
//! Enrichment is pull-only: nothing refreshes a bill except an explicit
//! `POST /v1/bills/{id}/refresh`, and the `meta` endpoint performs a live,
//! uncached fetch without persisting anything. Both dispatch on the bill's
//! source tag; the `sunlight` arm is an intentional no-op strategy.

use agora_core::bill::{BillDetails, BillSource};
use agora_core::error::CoreError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use agora_db::models::bill::{Bill, CreateBill};
use agora_db::repositories::BillRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

async fn find_bill(state: &AppState, id: &str) -> AppResult<Bill> {
    BillRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Bill",
            id: id.to_string(),
        }))
}

/// POST /v1/bills
///
/// Register a bill row with empty display fields. A refresh fills them.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBill>,
) -> AppResult<(StatusCode, Json<Bill>)> {
    if let Some(source) = &input.source {
        source.parse::<BillSource>()?;
    }
    let bill = BillRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(bill)))
}

/// GET /v1/bills/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Bill>> {
    Ok(Json(find_bill(&state, &id).await?))
}

/// GET /v1/bills/{id}/meta
///
/// Live fetch of the raw external record for ProPublica-sourced bills.
/// Never persisted or merged into the row. Any other source returns an
/// empty record without fetching.
pub async fn meta(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Value>> {
    let bill = find_bill(&state, &id).await?;
    match bill.source()? {
        BillSource::Propublica => {
            let record = state.bill_source.get_by_id(&bill.id).await?;
            Ok(Json(record))
        }
        BillSource::Sunlight => Ok(Json(Value::Object(Default::default()))),
    }
}

/// POST /v1/bills/{id}/refresh
///
/// Overwrites the bill's display fields from the external source and
/// persists. An optional JSON body supplies the record directly, skipping
/// the fetch. A record missing any expected key fails the refresh and
/// leaves the row untouched.
pub async fn refresh(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<Value>>,
) -> AppResult<Json<Bill>> {
    let bill = find_bill(&state, &id).await?;

    match bill.source()? {
        BillSource::Propublica => {
            let record = match body {
                Some(Json(record)) => record,
                None => state.bill_source.get_by_id(&bill.id).await?,
            };
            let details = BillDetails::from_record(&record)?;
            let updated = BillRepo::update_details(&state.pool, &bill.id, &details)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Bill",
                    id: bill.id.clone(),
                }))?;
            Ok(Json(updated))
        }
        // Sunlight bills are never auto-updated: no fetch, no write.
        BillSource::Sunlight => Ok(Json(bill)),
    }
}
