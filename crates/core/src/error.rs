//! Domain-level error type.

use crate::types::DbId;

/// Errors produced by domain logic, independent of any transport.
///
/// The HTTP layer maps these onto status codes; see `agora-api`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    ///
    /// `id` is a string because bill identifiers are externally assigned
    /// text keys; numeric ids are formatted on construction.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Input failed domain validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The external bill data source call failed (network, non-2xx,
    /// timeout, or undecodable body).
    #[error("External lookup failed: {0}")]
    ExternalLookup(String),

    /// A fetched external record is missing an expected field.
    #[error("Malformed external record: missing field '{field}'")]
    MalformedExternalRecord { field: &'static str },

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build a [`CoreError::NotFound`] for a numeric-keyed entity.
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
