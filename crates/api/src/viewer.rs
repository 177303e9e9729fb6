//! Optional viewer identity.
//!
//! The original ambient "current user" request context is replaced by
//! explicit parameter passing: handlers take a [`Viewer`] extracted from
//! the `X-Viewer-Id` header and thread it into the read-model functions.
//!
//! Extraction is total. A missing, empty, or malformed header yields an
//! anonymous viewer rather than a rejection, so unauthenticated requests
//! degrade to under-reported data (score 0, empty vote lists) instead of
//! erroring.

use std::convert::Infallible;

use agora_core::types::DbId;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use agora_db::models::profile::Profile;
use agora_db::repositories::ProfileRepo;
use agora_db::PgPool;

/// Header carrying the requesting account's profile id.
pub const VIEWER_HEADER: &str = "x-viewer-id";

/// The requesting identity, possibly anonymous.
#[derive(Debug, Clone, Copy)]
pub struct Viewer(pub Option<DbId>);

impl Viewer {
    /// Resolve the viewer to a profile row.
    ///
    /// Anonymous viewers resolve to `None`. A viewer id that matches no
    /// profile also resolves to `None` (with a warning log): the
    /// anonymous-safe contract means a stale or bogus id under-reports
    /// data, it never fails the request. Database errors still propagate.
    pub async fn resolve(self, pool: &PgPool) -> Result<Option<Profile>, sqlx::Error> {
        let Some(id) = self.0 else {
            return Ok(None);
        };
        let profile = ProfileRepo::find_by_id(pool, id).await?;
        if profile.is_none() {
            tracing::warn!(viewer_id = id, "Viewer id does not resolve to a profile");
        }
        Ok(profile)
    }
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let viewer = parts
            .headers
            .get(VIEWER_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<DbId>().ok());
        Ok(Viewer(viewer))
    }
}
