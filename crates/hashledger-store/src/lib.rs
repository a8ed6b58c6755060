//! # Hashledger Store
//!
//! Durable storage for a hashledger chain. The whole chain is persisted as a
//! single unit behind the [`Persistence`] trait.
//!
//! ## Key Types
//!
//! - [`Persistence`] - The trait for loading, saving and erasing a chain
//! - [`JsonFileStore`] - A single JSON file, replaced atomically on every save
//! - [`MemoryStore`] - In-memory storage with fault injection, for tests
//! - [`LoadOutcome`] - What a load found: nothing, a chain, or a corrupt store
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hashledger_store::{JsonFileStore, LoadOutcome, Persistence};
//!
//! let store = JsonFileStore::new("blockchain_data.json");
//! match store.load() {
//!     LoadOutcome::Missing => println!("no prior history"),
//!     LoadOutcome::Loaded(records) => println!("{} records", records.len()),
//!     LoadOutcome::Corrupt(err) => eprintln!("starting empty: {err}"),
//! }
//! store.save(&[]).unwrap();
//! ```
//!
//! ## Design Notes
//!
//! - **Whole-chain writes**: every save rewrites the full document
//! - **Atomic replace**: a failed save never leaves a torn file for the next load
//! - **Corruption is a value**: `load` never fails; a bad store reads as empty
//!   and carries a [`CorruptStoreError`] describing why

pub mod codec;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{CorruptStoreError, Result, StoreError};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::{LoadOutcome, Persistence};
