//! Repository for the append-only `activities` table.
//!
//! Provides the append path plus the two read-model projections: a viewer's
//! past votes on a thread and the per-account latest votes that back score
//! derivation. There are no update or delete methods on purpose.

use agora_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{Activity, CreateActivity, LatestVote, UserVote};

const COLUMNS: &str = "id, account_id, thread_id, civi_id, activity_type, created_at";

pub struct ActivityRepo;

impl ActivityRepo {
    /// Append an activity record, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateActivity) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (account_id, thread_id, civi_id, activity_type)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(input.account_id)
            .bind(input.thread_id)
            .bind(input.civi_id)
            .bind(&input.activity_type)
            .fetch_one(pool)
            .await
    }

    /// Every activity row matching (thread, account), each joined with the
    /// civi's type, in insertion order. This is the `user_votes` read
    /// model; it never mutates anything.
    pub async fn user_votes(
        pool: &PgPool,
        thread_id: DbId,
        account_id: DbId,
    ) -> Result<Vec<UserVote>, sqlx::Error> {
        sqlx::query_as::<_, UserVote>(
            "SELECT a.civi_id, a.activity_type, c.c_type
             FROM activities a
             JOIN civis c ON c.id = a.civi_id
             WHERE a.thread_id = $1 AND a.account_id = $2
             ORDER BY a.id",
        )
        .bind(thread_id)
        .bind(account_id)
        .fetch_all(pool)
        .await
    }

    /// Each account's most recent vote per civi across a whole thread.
    /// One query per thread read; the caller groups by `civi_id`.
    pub async fn latest_votes_for_thread(
        pool: &PgPool,
        thread_id: DbId,
    ) -> Result<Vec<LatestVote>, sqlx::Error> {
        sqlx::query_as::<_, LatestVote>(
            "SELECT DISTINCT ON (civi_id, account_id) civi_id, activity_type
             FROM activities
             WHERE thread_id = $1
             ORDER BY civi_id, account_id, id DESC",
        )
        .bind(thread_id)
        .fetch_all(pool)
        .await
    }

    /// Each account's most recent vote on one civi.
    pub async fn latest_votes_for_civi(
        pool: &PgPool,
        civi_id: DbId,
    ) -> Result<Vec<LatestVote>, sqlx::Error> {
        sqlx::query_as::<_, LatestVote>(
            "SELECT DISTINCT ON (account_id) civi_id, activity_type
             FROM activities
             WHERE civi_id = $1
             ORDER BY account_id, id DESC",
        )
        .bind(civi_id)
        .fetch_all(pool)
        .await
    }
}
