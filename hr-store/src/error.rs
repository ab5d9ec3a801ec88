//! Store error types
//!
//! None of these reach the UI through the store operations: storage and
//! network failures are logged and resolved with fallbacks. They surface
//! only from the storage backends and from configuration.

use thiserror::Error;

/// Durable storage error
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The value does not fit in the storage quota
    #[error("Storage quota exceeded for '{key}': {size} bytes > {quota} bytes")]
    QuotaExceeded { key: String, size: usize, quota: u64 },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Store-level error
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type StorageResult<T> = Result<T, StorageError>;
pub type StoreResult<T> = Result<T, StoreError>;
