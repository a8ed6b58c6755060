//! Error types for the ledger service.

use hashledger_core::{LinkageViolation, ValidationError};
use hashledger_store::{CorruptStoreError, StoreError};
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Rejected input. Nothing was changed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Internal invariant breakage. Indicates a bug, not bad input.
    #[error("linkage violation: {0}")]
    Linkage(#[from] LinkageViolation),

    /// Saving or erasing the durable store failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// The durable store could not be loaded.
    #[error("corrupt store: {0}")]
    Corrupt(#[from] CorruptStoreError),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
