//! Database error types for registrar-db.

use std::fmt;
use std::time::Duration;

use registrar_auth::AuthError;
use registrar_core::errors::CoreError;
use registrar_core::outcome::Rejection;
use serde::Serialize;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned data that could not be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// The addressed record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// An enroll or withdraw request failed one of its ordered checks.
    #[error("{0}")]
    Rejected(#[from] Rejection),

    /// Input was refused before reaching storage.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The call did not finish within the configured bound.
    #[error("storage call timed out after {0:?}")]
    Timeout(Duration),

    /// Credential hashing or verification failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<CoreError> for DatabaseError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity_type, id } => Self::NotFound {
                entity: entity_type,
                id,
            },
            CoreError::Validation(msg) | CoreError::InvalidTerm(msg) => Self::Validation(msg),
            CoreError::Other(e) => Self::Other(e),
        }
    }
}

/// Caller-facing error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    ValidationFailed,
    StorageError,
    StorageUnavailable,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::ValidationFailed => "validation_failed",
            Self::StorageError => "storage_error",
            Self::StorageUnavailable => "storage_unavailable",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DatabaseError {
    /// Classify this error for the caller.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoResult | Self::NotFound { .. } | Self::Auth(AuthError::InvalidCredentials) => {
                ErrorKind::NotFound
            }
            Self::Rejected(_) | Self::Validation(_) | Self::Auth(AuthError::EmptyPassword) => {
                ErrorKind::ValidationFailed
            }
            Self::Timeout(_) => ErrorKind::StorageUnavailable,
            Self::LibSql(e) if is_busy(e) => ErrorKind::StorageUnavailable,
            _ => ErrorKind::StorageError,
        }
    }

    /// The rejection carried by this error, if it is one.
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(r) => Some(r),
            _ => None,
        }
    }

    /// Whether this is another connection's write lock outlasting the busy
    /// timeout.
    pub(crate) fn is_lock_contention(&self) -> bool {
        matches!(self, Self::LibSql(e) if is_busy(e))
    }

    pub(crate) fn not_found(entity: &str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

/// Lock contention that outlasted the connection busy timeout.
fn is_busy(e: &libsql::Error) -> bool {
    let msg = e.to_string();
    msg.contains("database is locked") || msg.contains("database table is locked")
}
