//! Repository for the `threads` table.
//!
//! Every read computes `num_civis` and `num_solutions` alongside the row;
//! the counts are never stored.

use agora_core::types::DbId;
use sqlx::PgPool;

use crate::models::thread::{CreateThread, Thread, UpdateThread};

/// Column list shared across queries. The two counts are correlated
/// subqueries so list and detail reads return the same shape.
const COLUMNS: &str = "t.id, t.title, t.summary, t.author_id, t.category_id, \
    t.level, t.state, t.is_draft, t.image_url, t.num_views, \
    (SELECT COUNT(*) FROM civis c WHERE c.thread_id = t.id) AS num_civis, \
    (SELECT COUNT(*) FROM civis c WHERE c.thread_id = t.id AND c.c_type = 'solution') AS num_solutions, \
    t.created_at, t.updated_at";

/// Provides CRUD operations for threads.
pub struct ThreadRepo;

impl ThreadRepo {
    /// Insert a new thread, returning the created row.
    ///
    /// If `level` is `None`, defaults to `'federal'`.
    /// If `is_draft` is `None`, defaults to `true`.
    pub async fn create(pool: &PgPool, input: &CreateThread) -> Result<Thread, sqlx::Error> {
        let query = format!(
            "WITH inserted AS (
                INSERT INTO threads (title, summary, author_id, category_id, level, is_draft)
                VALUES ($1, $2, $3, $4, COALESCE($5, 'federal'), COALESCE($6, true))
                RETURNING *
             )
             SELECT {COLUMNS} FROM inserted t"
        );
        sqlx::query_as::<_, Thread>(&query)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(input.author_id)
            .bind(input.category_id)
            .bind(&input.level)
            .bind(input.is_draft)
            .fetch_one(pool)
            .await
    }

    /// Find a thread by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Thread>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM threads t WHERE t.id = $1");
        sqlx::query_as::<_, Thread>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all threads, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Thread>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM threads t ORDER BY t.created_at DESC, t.id DESC");
        sqlx::query_as::<_, Thread>(&query).fetch_all(pool).await
    }

    /// Update a thread. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateThread,
    ) -> Result<Option<Thread>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE threads SET
                    title = COALESCE($2, title),
                    summary = COALESCE($3, summary),
                    category_id = COALESCE($4, category_id),
                    level = COALESCE($5, level),
                    state = COALESCE($6, state),
                    is_draft = COALESCE($7, is_draft),
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM updated t"
        );
        sqlx::query_as::<_, Thread>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(input.category_id)
            .bind(&input.level)
            .bind(&input.state)
            .bind(input.is_draft)
            .fetch_optional(pool)
            .await
    }

    /// Delete a thread by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM threads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record one view of a thread detail page.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE threads SET num_views = num_views + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Set the thread's header image URL.
    pub async fn set_image_url(
        pool: &PgPool,
        id: DbId,
        image_url: &str,
    ) -> Result<Option<Thread>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE threads SET image_url = $2, updated_at = NOW()
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM updated t"
        );
        sqlx::query_as::<_, Thread>(&query)
            .bind(id)
            .bind(image_url)
            .fetch_optional(pool)
            .await
    }
}
