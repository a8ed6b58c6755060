//! Error types for the store module.

use hashledger_core::LinkageViolation;
use thiserror::Error;

/// Errors that can occur while saving or erasing a chain.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Chain could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// A durable store that exists but cannot be used.
///
/// Loads recover from this by treating history as empty; the error is
/// carried along so callers can report it.
#[derive(Debug, Error)]
pub enum CorruptStoreError {
    #[error("store {location} could not be read: {source}")]
    Unreadable {
        location: String,
        source: std::io::Error,
    },

    #[error("store {location} is not a valid chain document: {source}")]
    Malformed {
        location: String,
        source: serde_json::Error,
    },

    #[error("store {location} breaks chain linkage: {source}")]
    Linkage {
        location: String,
        source: LinkageViolation,
    },
}

impl CorruptStoreError {
    /// Where the corrupt store lives.
    pub fn location(&self) -> &str {
        match self {
            CorruptStoreError::Unreadable { location, .. }
            | CorruptStoreError::Malformed { location, .. }
            | CorruptStoreError::Linkage { location, .. } => location,
        }
    }
}
