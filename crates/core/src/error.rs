//! Domain-level error type shared across crates.

use crate::types::DbId;

/// Errors surfaced by domain logic and repositories.
///
/// The HTTP layer maps each variant onto a status code and a JSON error
/// envelope; nothing here knows about HTTP.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A lookup by id came back empty.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A request failed a field- or value-level check. The message is
    /// user-facing.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request conflicts with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Valid credentials, insufficient rights.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Anything that should never happen in normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}
