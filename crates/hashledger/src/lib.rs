//! # Hashledger
//!
//! An append-only ledger of transfer records. Each record carries the
//! SHA-256 digest of its own fields and a link to its predecessor's digest,
//! and the whole chain is persisted atomically after every change.
//!
//! ## Overview
//!
//! - **Records**: Immutable. Sealed once, never edited or reordered.
//! - **Chain**: Block numbers run 1, 2, 3, ... and every record links back
//!   to the one before it. The genesis record links to a fixed sentinel.
//! - **Persistence**: The full chain is written as one JSON document and
//!   replaced atomically. A missing or corrupt store reads as an empty chain.
//! - **Service**: [`ChainService`] validates input, links and appends the
//!   record, saves, and reports a [`Status`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hashledger::{ChainService, LedgerConfig, StatusLevel};
//!
//! let config = LedgerConfig::default();
//! let mut ledger = ChainService::from_config(&config);
//!
//! let status = ledger.append_record("Alice", "Bob", "10.5");
//! assert_eq!(status.level, StatusLevel::Success);
//!
//! for record in ledger.chain() {
//!     println!("#{} {} -> {} {}", record.block_number(), record.sender(),
//!              record.receiver(), record.amount());
//! }
//! ```
//!
//! ## Concurrency
//!
//! Mutating operations take `&mut self`, so a single owner is the only writer.
//! To share one ledger between threads, wrap the service in a `Mutex` and hold
//! the lock for the whole call.
//!
//! ## Re-exports
//!
//! - `hashledger::core` - Records, digests and the in-memory chain
//! - `hashledger::store` - Durable storage

pub mod config;
pub mod error;
pub mod export;
pub mod service;
pub mod status;

pub use hashledger_core as core;
pub use hashledger_store as store;

pub use config::{LedgerConfig, DATA_FILE_ENV, DEFAULT_DATA_FILE};
pub use error::{LedgerError, Result};
pub use export::ExportFormat;
pub use service::{AppendReport, ChainService};
pub use status::{Phase, Status, StatusLevel};

pub use hashledger_core::{
    verify_chain, Amount, ChainStore, ChainVerification, Digest, HashLinker, Link, Record,
    Timestamp, Transfer,
};
pub use hashledger_store::{JsonFileStore, LoadOutcome, MemoryStore, Persistence};
