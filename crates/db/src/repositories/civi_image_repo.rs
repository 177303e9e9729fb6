//! Repository for the `civi_images` table.

use agora_core::types::DbId;
use sqlx::PgPool;

use crate::models::civi_image::{CiviImage, CreateCiviImage};

const COLUMNS: &str = "id, civi_id, title, image_url, created_at";

pub struct CiviImageRepo;

impl CiviImageRepo {
    /// Attach an image record to a civi, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCiviImage) -> Result<CiviImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO civi_images (civi_id, title, image_url)
             VALUES ($1, COALESCE($2, ''), $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CiviImage>(&query)
            .bind(input.civi_id)
            .bind(&input.title)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// List a civi's attachments in insertion order.
    pub async fn list_by_civi(pool: &PgPool, civi_id: DbId) -> Result<Vec<CiviImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM civi_images WHERE civi_id = $1 ORDER BY id");
        sqlx::query_as::<_, CiviImage>(&query)
            .bind(civi_id)
            .fetch_all(pool)
            .await
    }

    /// All attachments for civis in the given thread. One query per thread
    /// read; the caller groups by `civi_id`.
    pub async fn list_by_thread(
        pool: &PgPool,
        thread_id: DbId,
    ) -> Result<Vec<CiviImage>, sqlx::Error> {
        sqlx::query_as::<_, CiviImage>(
            "SELECT i.id, i.civi_id, i.title, i.image_url, i.created_at
             FROM civi_images i
             JOIN civis c ON c.id = i.civi_id
             WHERE c.thread_id = $1
             ORDER BY i.civi_id, i.id",
        )
        .bind(thread_id)
        .fetch_all(pool)
        .await
    }
}
