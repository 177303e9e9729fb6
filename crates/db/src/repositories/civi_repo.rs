//! Repository for the `civis` and `civi_links` tables.

use agora_core::types::DbId;
use sqlx::{FromRow, PgPool};

use crate::models::civi::{Civi, CreateCivi, UpdateCivi};

/// Column list shared across queries. `responses` counts incoming links
/// from civis of type `response`; it is derived, never stored.
const COLUMNS: &str = "c.id, c.thread_id, c.author_id, c.c_type, c.title, c.body, \
    c.votes_vtneg, c.votes_neg, c.votes_neutral, c.votes_pos, c.votes_vtpos, \
    (SELECT COUNT(*) FROM civi_links l JOIN civis lc ON lc.id = l.civi_id \
     WHERE l.linked_civi_id = c.id AND lc.c_type = 'response') AS responses, \
    c.created_at, c.updated_at";

/// One row of the `civi_links` join table.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct CiviLink {
    pub civi_id: DbId,
    pub linked_civi_id: DbId,
}

/// Provides CRUD operations for civis and their links.
pub struct CiviRepo;

impl CiviRepo {
    /// Insert a new civi and its outgoing links in one transaction,
    /// returning the created row.
    ///
    /// If `c_type` is `None`, defaults to `'problem'`.
    pub async fn create(pool: &PgPool, input: &CreateCivi) -> Result<Civi, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "WITH inserted AS (
                INSERT INTO civis (thread_id, author_id, c_type, title, body)
                VALUES ($1, $2, COALESCE($3, 'problem'), $4, $5)
                RETURNING *
             )
             SELECT {COLUMNS} FROM inserted c"
        );
        let civi = sqlx::query_as::<_, Civi>(&query)
            .bind(input.thread_id)
            .bind(input.author_id)
            .bind(&input.c_type)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_one(&mut *tx)
            .await?;

        for linked in &input.linked_civis {
            sqlx::query(
                "INSERT INTO civi_links (civi_id, linked_civi_id)
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(civi.id)
            .bind(linked)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(civi)
    }

    /// Find a civi by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Civi>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM civis c WHERE c.id = $1");
        sqlx::query_as::<_, Civi>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every civi belonging to a thread, oldest first.
    pub async fn list_by_thread(pool: &PgPool, thread_id: DbId) -> Result<Vec<Civi>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM civis c
             WHERE c.thread_id = $1
             ORDER BY c.created_at, c.id"
        );
        sqlx::query_as::<_, Civi>(&query)
            .bind(thread_id)
            .fetch_all(pool)
            .await
    }

    /// Civis in the thread that respond to (link to) the given civi.
    pub async fn list_responses(
        pool: &PgPool,
        thread_id: DbId,
        civi_id: DbId,
    ) -> Result<Vec<Civi>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM civis c
             JOIN civi_links l ON l.civi_id = c.id
             WHERE l.linked_civi_id = $2
               AND c.thread_id = $1
               AND c.c_type IN ('response', 'rebuttal')
             ORDER BY c.created_at, c.id"
        );
        sqlx::query_as::<_, Civi>(&query)
            .bind(thread_id)
            .bind(civi_id)
            .fetch_all(pool)
            .await
    }

    /// Update a civi. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCivi,
    ) -> Result<Option<Civi>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE civis SET
                    c_type = COALESCE($2, c_type),
                    title = COALESCE($3, title),
                    body = COALESCE($4, body),
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM updated c"
        );
        sqlx::query_as::<_, Civi>(&query)
            .bind(id)
            .bind(&input.c_type)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_optional(pool)
            .await
    }

    /// Delete a civi by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM civis WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// IDs of the civis this civi links to (its responses/rebuttals
    /// targets), ordered by id.
    pub async fn linked_ids(pool: &PgPool, civi_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT linked_civi_id FROM civi_links WHERE civi_id = $1 ORDER BY linked_civi_id",
        )
        .bind(civi_id)
        .fetch_all(pool)
        .await
    }

    /// All links whose source civi belongs to the given thread. One query
    /// per thread read; the caller groups by `civi_id`.
    pub async fn links_for_thread(
        pool: &PgPool,
        thread_id: DbId,
    ) -> Result<Vec<CiviLink>, sqlx::Error> {
        sqlx::query_as::<_, CiviLink>(
            "SELECT l.civi_id, l.linked_civi_id FROM civi_links l
             JOIN civis c ON c.id = l.civi_id
             WHERE c.thread_id = $1
             ORDER BY l.civi_id, l.linked_civi_id",
        )
        .bind(thread_id)
        .fetch_all(pool)
        .await
    }

    /// Recompute the stored vote tally from the activity log.
    ///
    /// Each account's most recent vote on the civi counts once, so casting
    /// a new vote replaces that account's earlier contribution instead of
    /// inflating the tally. Returns the updated row, or `None` if the civi
    /// does not exist.
    pub async fn recompute_tally(pool: &PgPool, civi_id: DbId) -> Result<Option<Civi>, sqlx::Error> {
        let query = format!(
            "WITH latest AS (
                SELECT DISTINCT ON (account_id) activity_type
                FROM activities
                WHERE civi_id = $1
                ORDER BY account_id, id DESC
             ), updated AS (
                UPDATE civis SET
                    votes_vtneg = (SELECT COUNT(*)::int FROM latest WHERE activity_type = 'vote_veryneg'),
                    votes_neg = (SELECT COUNT(*)::int FROM latest WHERE activity_type = 'vote_neg'),
                    votes_neutral = (SELECT COUNT(*)::int FROM latest WHERE activity_type = 'vote_wtf'),
                    votes_pos = (SELECT COUNT(*)::int FROM latest WHERE activity_type = 'vote_pos'),
                    votes_vtpos = (SELECT COUNT(*)::int FROM latest WHERE activity_type = 'vote_verypos'),
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM updated c"
        );
        sqlx::query_as::<_, Civi>(&query)
            .bind(civi_id)
            .fetch_optional(pool)
            .await
    }
}
