//! Shared helpers for API integration tests.
//!
//! Mirrors the router construction in `main.rs` so tests exercise the same
//! middleware stack (CORS, request ID, timeout, tracing, panic recovery)
//! that production uses, with a mock bill data source installed in place
//! of the live ProPublica client.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use agora_api::config::ServerConfig;
use agora_api::routes;
use agora_api::state::AppState;
use agora_core::bill::BillDataSource;
use agora_core::error::CoreError;

/// A scripted bill data source that counts fetches.
pub struct MockBillSource {
    record: Option<Value>,
    fetches: AtomicUsize,
}

impl MockBillSource {
    /// Always returns the given record.
    pub fn returning(record: Value) -> Arc<Self> {
        Arc::new(Self {
            record: Some(record),
            fetches: AtomicUsize::new(0),
        })
    }

    /// Always fails with an external lookup error.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            record: None,
            fetches: AtomicUsize::new(0),
        })
    }

    /// Number of lookups performed so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl BillDataSource for MockBillSource {
    async fn get_by_id(&self, bill_id: &str) -> Result<Value, CoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.record {
            Some(record) => Ok(record.clone()),
            None => Err(CoreError::ExternalLookup(format!(
                "mock lookup for '{bill_id}' failed"
            ))),
        }
    }
}

/// A complete external bill record with every expected key present.
pub fn full_bill_record() -> Value {
    json!({
        "title": "A",
        "short_title": "B",
        "summary_short": "C",
        "number": 1,
        "bill_type": "hr",
        "congress_url": "u1",
        "govtrack_url": "u2",
    })
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        propublica_base_url: "http://localhost:0".to_string(),
        propublica_api_key: String::new(),
        propublica_timeout_secs: 10,
    }
}

/// Build the full application router with the default mock bill source.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_source(pool, MockBillSource::returning(full_bill_record()))
}

/// Build the full application router with a specific bill source.
pub fn build_test_app_with_source(pool: PgPool, source: Arc<dyn BillDataSource>) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
        bill_source: source,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .merge(routes::legacy::router())
        .nest("/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// GET with an `X-Viewer-Id` header identifying the requesting profile.
pub async fn get_as(app: Router, uri: &str, viewer_id: i64) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("x-viewer-id", viewer_id.to_string())
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_as(app: Router, uri: &str, viewer_id: i64, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header("x-viewer-id", viewer_id.to_string())
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST with no body at all (the bill refresh endpoint's fetch path).
pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Create a profile and return its id.
pub async fn seed_profile(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO profiles (username) VALUES ($1) RETURNING id")
        .bind(username)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Create a category and return its id.
pub async fn seed_category(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Create a thread and return its id.
pub async fn seed_thread(pool: &PgPool, author_id: i64, category_id: i64, title: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO threads (title, summary, author_id, category_id)
         VALUES ($1, 'summary', $2, $3) RETURNING id",
    )
    .bind(title)
    .bind(author_id)
    .bind(category_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Create a civi and return its id.
pub async fn seed_civi(pool: &PgPool, thread_id: i64, author_id: i64, c_type: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO civis (thread_id, author_id, c_type, title, body)
         VALUES ($1, $2, $3, 'title', 'body') RETURNING id",
    )
    .bind(thread_id)
    .bind(author_id)
    .bind(c_type)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Create a bill row with empty display fields and the given source.
pub async fn seed_bill(pool: &PgPool, id: &str, source: &str) -> String {
    sqlx::query_scalar("INSERT INTO bills (id, source) VALUES ($1, $2) RETURNING id")
        .bind(id)
        .bind(source)
        .fetch_one(pool)
        .await
        .unwrap()
}
