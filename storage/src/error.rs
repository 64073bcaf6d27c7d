//! Storage error types.
//!
//! Used by repository implementations and callers of storage APIs.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),
    #[error("Timed out waiting for a database connection")]
    PoolTimedOut,
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => StorageError::PoolTimedOut,
            other => StorageError::Database(other.to_string()),
        }
    }
}
