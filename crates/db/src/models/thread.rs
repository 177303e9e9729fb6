//! Thread entity model and DTOs.

use agora_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `threads` table, with the two derived counts every read
/// computes alongside it (`num_civis`, `num_solutions` are never stored).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Thread {
    pub id: DbId,
    pub title: String,
    pub summary: String,
    pub author_id: DbId,
    pub category_id: DbId,
    pub level: String,
    pub state: String,
    pub is_draft: bool,
    pub image_url: Option<String>,
    pub num_views: i64,
    pub num_civis: i64,
    pub num_solutions: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new thread.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateThread {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 1023))]
    pub summary: String,
    pub author_id: DbId,
    pub category_id: DbId,
    /// Defaults to `federal` if omitted.
    pub level: Option<String>,
    /// Defaults to `true` (new threads start as drafts).
    pub is_draft: Option<bool>,
}

/// DTO for updating an existing thread. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateThread {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub category_id: Option<DbId>,
    pub level: Option<String>,
    pub state: Option<String>,
    pub is_draft: Option<bool>,
}
