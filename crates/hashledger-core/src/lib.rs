//! # Hashledger Core
//!
//! Pure primitives for hashledger: transfer records, digests, and the
//! hash-linked chain that holds them.
//!
//! This crate contains no I/O and no storage. It is pure computation over
//! the record chain and its invariants.
//!
//! ## Key Types
//!
//! - [`Record`] - One immutable transfer, sealed with its digest
//! - [`Digest`] - SHA-256 digest of a record's canonical fields
//! - [`Link`] - The 16-hex prefix of the previous record's digest
//! - [`ChainStore`] - The in-memory, append-only ordered chain
//! - [`HashLinker`] - Computes the digest that links a record to its predecessor
//!
//! ## Invariants
//!
//! For every chain observable through [`ChainStore`]:
//!
//! 1. The record at index `i` has `block_number == i + 1`.
//! 2. The record at index `i > 0` has `previous_hash == records[i - 1].hash().link()`,
//!    and the genesis record carries [`Link::GENESIS`].
//! 3. Records are never removed or reordered except by [`ChainStore::clear`].
//! 4. Digests are computed once, when a record is sealed.

pub mod chain;
pub mod error;
pub mod linker;
pub mod record;
pub mod types;
pub mod validation;
pub mod verify;

pub use chain::ChainStore;
pub use error::{Field, LinkageViolation, ValidationError};
pub use linker::HashLinker;
pub use record::{Amount, Record, Timestamp, TIMESTAMP_FORMAT};
pub use types::{Digest, Link};
pub use validation::Transfer;
pub use verify::{verify_chain, ChainErrorType, ChainVerification};
