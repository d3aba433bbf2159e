//! Cross-cutting error types for Registrar.
//!
//! Storage-specific errors (`DatabaseError`) live in `registrar-db`, credential
//! errors (`AuthError`) in `registrar-auth`. All of them converge into `anyhow`
//! in the `registrar` binary.

use thiserror::Error;

/// Errors that can be raised by any Registrar crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Input failed validation (empty grade, empty password, bad identifier).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A quarter label or year could not be interpreted.
    #[error("Invalid term: {0}")]
    InvalidTerm(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
