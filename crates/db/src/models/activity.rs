//! Activity log model and read-model row shapes.

use agora_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the append-only `activities` table: which account acted, on
/// which civi, within which thread, and how.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub account_id: DbId,
    pub thread_id: DbId,
    pub civi_id: DbId,
    pub activity_type: String,
    pub created_at: Timestamp,
}

/// DTO for appending an activity record.
///
/// There is no update DTO on purpose: the log is append-only.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivity {
    pub account_id: DbId,
    pub thread_id: DbId,
    pub civi_id: DbId,
    pub activity_type: String,
}

/// One entry of a viewer's past activity on a thread, joined with the
/// civi's type. This is the `user_votes` wire shape.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserVote {
    pub civi_id: DbId,
    pub activity_type: String,
    pub c_type: String,
}

/// An account's most recent vote on one civi, used for score derivation.
#[derive(Debug, Clone, FromRow)]
pub struct LatestVote {
    pub civi_id: DbId,
    pub activity_type: String,
}
