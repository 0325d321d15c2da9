//! Public error types for the accounts module.
//!
//! "Not found" is not an error: lookups return `Option`.

use thiserror::Error;

/// Errors returned by account repository operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountsError {
    /// A unique constraint (`email` or `sso_id`) rejected the write.
    #[error("User with this {field} already exists")]
    Conflict { field: String },

    /// The operation targets an identity that is not (or no longer) persisted.
    #[error("Invalid entity: {reason}")]
    InvalidEntity { reason: String },

    /// Any other backend fault: connectivity, constraints, serialization, timeouts.
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl AccountsError {
    /// Create a `Conflict` error for the given column.
    #[must_use]
    pub fn conflict(field: impl Into<String>) -> Self {
        Self::Conflict {
            field: field.into(),
        }
    }

    /// Create an `InvalidEntity` error.
    #[must_use]
    pub fn invalid_entity(reason: impl Into<String>) -> Self {
        Self::InvalidEntity {
            reason: reason.into(),
        }
    }

    /// Create a `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
