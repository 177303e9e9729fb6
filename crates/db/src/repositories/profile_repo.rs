//! Repository for the `profiles` table.

use agora_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{CreateProfile, Profile, UpdateProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, first_name, last_name, about_me, \
    profile_image_url, created_at, updated_at";

/// Provides CRUD operations for profiles, plus the contributor lookup
/// backing thread read models.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (username, first_name, last_name, about_me, profile_image_url)
             VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), COALESCE($4, ''), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(&input.username)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.about_me)
            .bind(&input.profile_image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all profiles, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles ORDER BY id");
        sqlx::query_as::<_, Profile>(&query).fetch_all(pool).await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                about_me = COALESCE($4, about_me),
                profile_image_url = COALESCE($5, profile_image_url),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.about_me)
            .bind(&input.profile_image_url)
            .fetch_optional(pool)
            .await
    }

    /// Profiles that authored at least one civi in the given thread.
    ///
    /// Distinctness is enforced at the query boundary (`DISTINCT` over the
    /// author id), so a profile appears at most once no matter how many
    /// civis it authored.
    pub async fn thread_contributors(
        pool: &PgPool,
        thread_id: DbId,
    ) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM profiles
             WHERE id IN (SELECT DISTINCT author_id FROM civis WHERE thread_id = $1)"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(thread_id)
            .fetch_all(pool)
            .await
    }

    /// IDs of the categories a profile has marked as preferred.
    pub async fn preferred_category_ids(
        pool: &PgPool,
        profile_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT category_id FROM profile_categories WHERE profile_id = $1",
        )
        .bind(profile_id)
        .fetch_all(pool)
        .await
    }

    /// Mark a category as preferred for a profile. Idempotent.
    pub async fn prefer_category(
        pool: &PgPool,
        profile_id: DbId,
        category_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO profile_categories (profile_id, category_id)
             VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(profile_id)
        .bind(category_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
