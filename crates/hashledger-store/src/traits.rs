//! Persistence trait: the abstract interface for durable chain storage.
//!
//! The chain is always stored and replaced as one unit. There is no
//! incremental append at this layer.

use std::sync::Arc;

use hashledger_core::Record;

use crate::error::{CorruptStoreError, Result};

/// What a load found.
#[derive(Debug)]
pub enum LoadOutcome {
    /// No durable store exists yet. Not an error: there is no prior history.
    Missing,
    /// A valid chain, oldest record first.
    Loaded(Vec<Record>),
    /// The store exists but is unusable. History is treated as empty.
    Corrupt(CorruptStoreError),
}

impl LoadOutcome {
    /// The loaded records; empty unless the outcome is `Loaded`.
    pub fn records(&self) -> &[Record] {
        match self {
            LoadOutcome::Loaded(records) => records,
            LoadOutcome::Missing | LoadOutcome::Corrupt(_) => &[],
        }
    }

    /// The corruption signal, if any.
    pub fn corruption(&self) -> Option<&CorruptStoreError> {
        match self {
            LoadOutcome::Corrupt(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, LoadOutcome::Corrupt(_))
    }

    /// Split into the records to start from and the corruption signal.
    pub fn into_parts(self) -> (Vec<Record>, Option<CorruptStoreError>) {
        match self {
            LoadOutcome::Missing => (Vec::new(), None),
            LoadOutcome::Loaded(records) => (records, None),
            LoadOutcome::Corrupt(err) => (Vec::new(), Some(err)),
        }
    }
}

/// Durable storage for a whole chain.
///
/// # Design Notes
///
/// - `load` never fails. A missing store is `Missing`; an unreadable or
///   malformed one is `Corrupt`, and the caller starts from an empty chain.
/// - `load` doesn't modify the store; loading twice gives the same outcome.
/// - `Loaded` records are not guaranteed to form a valid chain. The shipped
///   stores check linkage while decoding, but callers revalidate anyway.
/// - `save` replaces the entire stored chain. A failed save must leave the
///   previous contents (or nothing) observable, never a partial document.
/// - `erase` removes the store. Erasing a store that doesn't exist succeeds.
pub trait Persistence: Send + Sync {
    /// Read the stored chain.
    fn load(&self) -> LoadOutcome;

    /// Replace the stored chain with `records`.
    fn save(&self, records: &[Record]) -> Result<()>;

    /// Remove the stored chain entirely.
    fn erase(&self) -> Result<()>;

    /// Human-readable location for logs and messages.
    fn location(&self) -> String;
}

impl<P: Persistence + ?Sized> Persistence for Arc<P> {
    fn load(&self) -> LoadOutcome {
        (**self).load()
    }

    fn save(&self, records: &[Record]) -> Result<()> {
        (**self).save(records)
    }

    fn erase(&self) -> Result<()> {
        (**self).erase()
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
