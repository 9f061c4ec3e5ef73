//! Error types for the storage layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Storage Error Enum ==
/// Unified error type for storage adapters.
///
/// These errors never reach cache callers: the facade logs every failure
/// and maps it to a safe default (miss on read, no-op on write).
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying I/O failure (disk full, permission denied)
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Stored envelope could not be decoded
    #[error("corrupt cache entry: {0}")]
    Corrupt(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
