//! Error types for the Hashledger Core.

use std::fmt;

use thiserror::Error;

use crate::types::Link;

/// A user-supplied transfer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Sender,
    Receiver,
    Amount,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Sender => write!(f, "sender"),
            Field::Receiver => write!(f, "receiver"),
            Field::Amount => write!(f, "amount"),
        }
    }
}

/// Errors in caller-supplied transfer input.
///
/// Always recoverable: nothing has been mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(Field),

    #[error("amount is not a valid number: {0:?}")]
    InvalidAmount(String),
}

/// A record that would break the chain's sequence or linkage.
///
/// In normal operation the chain service always builds correctly linked
/// records, so seeing one of these means an internal invariant broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkageViolation {
    #[error("invalid block number: expected {expected}, got {got}")]
    InvalidSequence { expected: u64, got: u64 },

    #[error("block {block_number} links to {got}, expected {expected}")]
    InvalidLink {
        block_number: u64,
        expected: Link,
        got: Link,
    },
}
