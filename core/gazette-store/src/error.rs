//! Error types for the storage layer.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Row not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A stored value did not parse back into its domain type.
    #[error("invalid data: {0}")]
    InvalidData(String),
}
