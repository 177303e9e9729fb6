//! Civi scoring.
//!
//! A civi's score is never stored. It is derived on read from the activity
//! log: each account's most recent vote on the civi contributes its weight,
//! and the score is the sum. Callers pass the already-deduplicated list of
//! latest votes (one entry per account); the database layer produces it with
//! a `DISTINCT ON (account_id)` query.
//!
//! Scores are only computed for authenticated viewers. Anonymous requests
//! short-circuit to 0 before this function is reached.

use crate::civi::ActivityType;

/// Sum the weights of the given votes.
pub fn civi_score(latest_votes: &[ActivityType]) -> i64 {
    latest_votes.iter().map(|v| v.weight()).sum()
}
