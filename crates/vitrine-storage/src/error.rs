//! Storage error types.

use thiserror::Error;

/// Errors that can occur when talking to a key-value backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend cannot be reached at all.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// The backend refused a write because it is out of space.
    #[error("storage quota exceeded writing key {0}")]
    QuotaExceeded(String),

    /// The backend failed mid-operation.
    #[error("store operation failed: {0}")]
    Backend(String),
}
