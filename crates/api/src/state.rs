use std::sync::Arc;

use agora_core::bill::BillDataSource;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: agora_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// External bill data source. A trait object so integration tests can
    /// install a mock instead of the live ProPublica client.
    pub bill_source: Arc<dyn BillDataSource>,
}
