//! Bill entity model.

use agora_core::bill::BillSource;
use agora_core::error::CoreError;
use agora_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `bills` table. The primary key is the externally
/// assigned bill identifier.
///
/// For `propublica`-sourced rows the display fields are stale by default
/// and only change through the refresh operation; `sunlight` rows are never
/// touched by enrichment.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Bill {
    pub id: String,
    pub title: String,
    pub short_title: String,
    pub short_summary: String,
    pub number: i32,
    pub b_type: String,
    pub source: String,
    pub congress_url: Option<String>,
    pub govtrack_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Bill {
    /// Parse the stored source tag.
    pub fn source(&self) -> Result<BillSource, CoreError> {
        self.source.parse()
    }
}

/// DTO for registering a bill row (used by import tooling and tests;
/// display fields start empty and are filled by a refresh).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBill {
    pub id: String,
    /// Defaults to `propublica` if omitted.
    pub source: Option<String>,
}
