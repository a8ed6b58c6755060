//! In-memory implementation of the Persistence trait.
//!
//! This is primarily for testing. It keeps the encoded document rather than
//! the records, so it goes through the same codec as the file store, and it
//! can be told to fail saves and erases.

use std::io;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hashledger_core::Record;

use crate::codec;
use crate::error::Result;
use crate::traits::{LoadOutcome, Persistence};

/// In-memory store with fault injection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    /// The stored document; `None` when nothing has been saved.
    bytes: Option<Vec<u8>>,
    fail_saves: bool,
    fail_erases: bool,
    saves: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `bytes`, valid or not.
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.write().bytes = Some(bytes.into());
        store
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.write().fail_saves = fail;
    }

    /// Make subsequent erases fail (or succeed again).
    pub fn set_fail_erases(&self, fail: bool) {
        self.write().fail_erases = fail;
    }

    /// The stored document, if any.
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.read().bytes.clone()
    }

    pub fn exists(&self) -> bool {
        self.read().bytes.is_some()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.read().saves
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryStoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryStoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Persistence for MemoryStore {
    fn load(&self) -> LoadOutcome {
        let inner = self.read();
        match &inner.bytes {
            None => LoadOutcome::Missing,
            Some(bytes) => match codec::decode(bytes) {
                Ok(records) => LoadOutcome::Loaded(records),
                Err(e) => LoadOutcome::Corrupt(e.into_corrupt(self.location())),
            },
        }
    }

    fn save(&self, records: &[Record]) -> Result<()> {
        let bytes = codec::encode(records)?;
        let mut inner = self.write();
        if inner.fail_saves {
            return Err(io::Error::other("injected save failure").into());
        }
        inner.bytes = Some(bytes);
        inner.saves += 1;
        Ok(())
    }

    fn erase(&self) -> Result<()> {
        let mut inner = self.write();
        if inner.fail_erases {
            return Err(io::Error::other("injected erase failure").into());
        }
        inner.bytes = None;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
