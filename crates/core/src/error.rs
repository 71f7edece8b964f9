//! Domain-level error taxonomy.
//!
//! The API crate maps these onto HTTP statuses: `Validation` -> 400,
//! `NotFound` -> 404, `Forbidden` -> 403, `Unauthorized` -> 401,
//! `Conflict` -> 409, `Internal` -> 500.

use crate::types::DbId;

/// Domain error shared across the repository and API layers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity was looked up by id and does not exist (or is not visible
    /// to the caller).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness violation (duplicate reference, duplicate row).
    #[error("{0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("{0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed to act on the resource.
    #[error("{0}")]
    Forbidden(String),

    /// An unexpected internal failure; the message is logged, never
    /// returned to the client verbatim.
    #[error("{0}")]
    Internal(String),
}
