//! Test fixtures and helpers.

use std::sync::Arc;

use chrono::Duration;

use hashledger::{ChainService, Status};
use hashledger_core::{ChainStore, Record, Timestamp, Transfer};
use hashledger_store::MemoryStore;

/// Timestamp of the first record a fixture appends.
pub const EPOCH: &str = "2024-01-15 09:30:00";

/// A ledger over a shared in-memory store, with a clock that advances one
/// minute per append.
pub struct TestLedger {
    pub service: ChainService<Arc<MemoryStore>>,
    pub store: Arc<MemoryStore>,
    minutes: i64,
}

impl TestLedger {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Open a ledger over an existing store, as a restart would.
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        Self {
            service: ChainService::open(Arc::clone(&store)),
            store,
            minutes: 0,
        }
    }

    /// Append with the next tick of the fixture clock.
    pub fn append(&mut self, sender: &str, receiver: &str, amount: &str) -> Status {
        let at = tick(self.minutes);
        self.minutes += 1;
        self.service.append_record_at(sender, receiver, amount, at)
    }

    /// Reopen the same store.
    pub fn reopen(&self) -> Self {
        Self::with_store(Arc::clone(&self.store))
    }
}

impl Default for TestLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a valid chain of `len` records without going through a store.
pub fn sample_chain(len: usize) -> Vec<Record> {
    let mut chain = ChainStore::new();
    for i in 0..len {
        let transfer =
            Transfer::parse("Alice", "Bob", &format!("{}.25", i)).expect("valid fixture transfer");
        let record = Record::seal(
            &transfer,
            chain.next_block_number(),
            chain.next_link(),
            tick(i as i64),
        );
        chain.append(record).expect("fixture record links");
    }
    chain.into_records()
}

fn tick(minutes: i64) -> Timestamp {
    let epoch = Timestamp::parse(EPOCH).expect("valid fixture epoch");
    Timestamp::from_datetime(epoch.as_datetime() + Duration::minutes(minutes))
}
