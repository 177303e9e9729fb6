//! Civi entity model and DTOs.

use agora_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `civis` table, with the derived `responses` count
/// (linked civis of type `response`) computed alongside it.
///
/// The stored tally columns are recomputed from the activity log whenever a
/// vote is cast; a civi's *score* is never stored and is derived per read
/// (see `agora_core::scoring`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Civi {
    pub id: DbId,
    pub thread_id: DbId,
    pub author_id: DbId,
    pub c_type: String,
    pub title: String,
    pub body: String,
    pub votes_vtneg: i32,
    pub votes_neg: i32,
    pub votes_neutral: i32,
    pub votes_pos: i32,
    pub votes_vtpos: i32,
    pub responses: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Civi {
    /// The stored vote tally as a wire-format object.
    pub fn tally(&self) -> VoteTally {
        VoteTally {
            votes_vtneg: self.votes_vtneg,
            votes_neg: self.votes_neg,
            votes_neutral: self.votes_neutral,
            votes_pos: self.votes_pos,
            votes_vtpos: self.votes_vtpos,
        }
    }
}

/// Per-kind vote counts for one civi.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VoteTally {
    pub votes_vtneg: i32,
    pub votes_neg: i32,
    pub votes_neutral: i32,
    pub votes_pos: i32,
    pub votes_vtpos: i32,
}

/// DTO for creating a new civi.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCivi {
    pub thread_id: DbId,
    pub author_id: DbId,
    /// Defaults to `problem` if omitted.
    pub c_type: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
    /// Civis this one responds to or rebuts.
    #[serde(default)]
    pub linked_civis: Vec<DbId>,
}

/// DTO for updating an existing civi. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCivi {
    pub c_type: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
}
