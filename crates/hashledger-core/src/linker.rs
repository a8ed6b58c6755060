//! Digest computation that links each record to its predecessor.
//!
//! The canonical input is the plain concatenation
//! `sender || receiver || amount_text || timestamp || previous_link`
//! with no separators, hashed with SHA-256. Stored chains depend on this
//! exact layout, so it must not change.

use sha2::{Digest as _, Sha256};

use crate::record::{Record, Timestamp};
use crate::types::{Digest, Link};

/// Pure digest computation for records.
pub struct HashLinker;

impl HashLinker {
    /// Compute the digest for a record's fields.
    ///
    /// Deterministic and side-effect free. Inputs are not validated here.
    pub fn compute(
        sender: &str,
        receiver: &str,
        amount_text: &str,
        timestamp: &Timestamp,
        previous: &Link,
    ) -> Digest {
        let input = Self::canonical_input(sender, receiver, amount_text, timestamp, previous);
        Digest(Sha256::digest(input.as_bytes()).into())
    }

    /// Build the canonical string that [`HashLinker::compute`] hashes.
    pub fn canonical_input(
        sender: &str,
        receiver: &str,
        amount_text: &str,
        timestamp: &Timestamp,
        previous: &Link,
    ) -> String {
        let timestamp = timestamp.to_string();
        let previous = previous.to_hex();
        let mut input = String::with_capacity(
            sender.len() + receiver.len() + amount_text.len() + timestamp.len() + previous.len(),
        );
        input.push_str(sender);
        input.push_str(receiver);
        input.push_str(amount_text);
        input.push_str(&timestamp);
        input.push_str(&previous);
        input
    }

    /// Check a record's digest against the raw amount text it was sealed with.
    ///
    /// Records only keep the normalized amount, so the entered text has to
    /// come from the caller (e.g. an audit log of the input).
    pub fn matches(record: &Record, amount_text: &str) -> bool {
        let expected = Self::compute(
            record.sender(),
            record.receiver(),
            amount_text,
            &record.timestamp(),
            &record.previous_hash(),
        );
        expected == record.hash()
    }
}
