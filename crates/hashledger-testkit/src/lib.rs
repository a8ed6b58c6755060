//! # Hashledger Testkit
//!
//! Testing utilities for Hashledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known transfers with their expected digests, for
//!   checking other implementations against this one
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A ledger over an in-memory store with a deterministic clock
//!
//! ## Golden Vectors
//!
//! ```rust
//! use hashledger_testkit::vectors::{all_vectors, record_from_vector};
//!
//! for vector in all_vectors() {
//!     let record = record_from_vector(&vector);
//!     assert_eq!(record.hash().to_hex(), vector.expected_hash);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use hashledger_testkit::generators::{record_from_params, TransferParams};
//!
//! proptest! {
//!     #[test]
//!     fn digest_is_deterministic(params: TransferParams) {
//!         prop_assert_eq!(record_from_params(&params).hash(), record_from_params(&params).hash());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use hashledger_testkit::fixtures::TestLedger;
//!
//! let mut ledger = TestLedger::new();
//! ledger.append("Alice", "Bob", "10.5");
//! assert_eq!(ledger.service.chain().count(), 1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{sample_chain, TestLedger, EPOCH};
pub use generators::{record_from_params, TransferParams};
pub use vectors::{all_vectors, record_from_vector, verify_all_vectors, GoldenVector};
