//! Civi image attachment model and DTO.

use agora_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `civi_images` table. Belongs to exactly one civi.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CiviImage {
    pub id: DbId,
    pub civi_id: DbId,
    pub title: String,
    pub image_url: String,
    pub created_at: Timestamp,
}

/// DTO for attaching an image record to a civi.
///
/// File handling is out of scope; callers supply the already-hosted URL.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCiviImage {
    pub civi_id: DbId,
    pub title: Option<String>,
    pub image_url: String,
}
