//! Route tables.

pub mod health;
pub mod legacy;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{bills, categories, civis, profiles, threads};
use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// ```text
/// /threads                 list, create
/// /threads/{id}            get, update, delete
/// /categories              list, create
/// /categories/{id}         get
/// /civis                   create
/// /civis/{id}              get, update, delete
/// /accounts                list, create
/// /accounts/{id}           get, update
/// /accounts/{id}/categories  mark a preferred category (POST)
/// /bills                   register (POST)
/// /bills/{id}              get
/// /bills/{id}/meta         live external record (GET)
/// /bills/{id}/refresh      overwrite display fields from source (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/threads", get(threads::list).post(threads::create))
        .route(
            "/threads/{id}",
            get(threads::get_by_id)
                .put(threads::update)
                .delete(threads::delete),
        )
        .route("/categories", get(categories::list).post(categories::create))
        .route("/categories/{id}", get(categories::get_by_id))
        .route("/civis", post(civis::create))
        .route(
            "/civis/{id}",
            get(civis::get_by_id)
                .put(civis::update)
                .delete(civis::delete),
        )
        .route("/accounts", get(profiles::list).post(profiles::create))
        .route(
            "/accounts/{id}",
            get(profiles::get_by_id).put(profiles::update),
        )
        .route(
            "/accounts/{id}/categories",
            post(profiles::prefer_category),
        )
        .route("/bills", post(bills::create))
        .route("/bills/{id}", get(bills::get_by_id))
        .route("/bills/{id}/meta", get(bills::meta))
        .route("/bills/{id}/refresh", post(bills::refresh))
}
