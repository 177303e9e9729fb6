//! Repository for the `bills` table.
//!
//! Bill rows are created by the import path and mutated only through
//! [`BillRepo::update_details`], the single write path the enrichment
//! updater uses.

use agora_core::bill::BillDetails;
use sqlx::PgPool;

use crate::models::bill::{Bill, CreateBill};

const COLUMNS: &str = "id, title, short_title, short_summary, number, b_type, \
    source, congress_url, govtrack_url, created_at, updated_at";

pub struct BillRepo;

impl BillRepo {
    /// Register a bill row with empty display fields.
    ///
    /// If `source` is `None`, defaults to `'propublica'`.
    pub async fn create(pool: &PgPool, input: &CreateBill) -> Result<Bill, sqlx::Error> {
        let query = format!(
            "INSERT INTO bills (id, source)
             VALUES ($1, COALESCE($2, 'propublica'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bill>(&query)
            .bind(&input.id)
            .bind(&input.source)
            .fetch_one(pool)
            .await
    }

    /// Find a bill by its externally assigned identifier.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Bill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bills WHERE id = $1");
        sqlx::query_as::<_, Bill>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite a bill's display fields and persist.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_details(
        pool: &PgPool,
        id: &str,
        details: &BillDetails,
    ) -> Result<Option<Bill>, sqlx::Error> {
        let query = format!(
            "UPDATE bills SET
                title = $2,
                short_title = $3,
                short_summary = $4,
                number = $5,
                b_type = $6,
                congress_url = $7,
                govtrack_url = $8,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bill>(&query)
            .bind(id)
            .bind(&details.title)
            .bind(&details.short_title)
            .bind(&details.short_summary)
            .bind(details.number)
            .bind(&details.b_type)
            .bind(&details.congress_url)
            .bind(&details.govtrack_url)
            .fetch_optional(pool)
            .await
    }
}
