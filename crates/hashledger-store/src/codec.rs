//! On-disk encoding of a chain.
//!
//! A chain is a JSON array of record objects, pretty-printed with two-space
//! indentation:
//!
//! ```json
//! [
//!   {
//!     "id": "9b2f4c1e-…",
//!     "blockNumber": 1,
//!     "sender": "Alice",
//!     "receiver": "Bob",
//!     "amount": "10.50",
//!     "timestamp": "2024-01-15 09:30:00",
//!     "previousHash": "0000000000000000",
//!     "hash": "1ed97b3f…"
//!   }
//! ]
//! ```

use hashledger_core::{ChainStore, LinkageViolation, Record};

use crate::error::{CorruptStoreError, Result};

/// Why a stored document could not be turned back into a chain.
#[derive(Debug)]
pub enum DecodeError {
    /// Not a JSON array of well-formed records.
    Malformed(serde_json::Error),
    /// Well-formed records that don't form a valid chain.
    Linkage(LinkageViolation),
}

impl DecodeError {
    /// Attach the store location.
    pub fn into_corrupt(self, location: String) -> CorruptStoreError {
        match self {
            DecodeError::Malformed(source) => CorruptStoreError::Malformed { location, source },
            DecodeError::Linkage(source) => CorruptStoreError::Linkage { location, source },
        }
    }
}

/// Encode a chain.
pub fn encode(records: &[Record]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}

/// Decode a chain, checking sequence and linkage invariants.
pub fn decode(bytes: &[u8]) -> std::result::Result<Vec<Record>, DecodeError> {
    let records: Vec<Record> = serde_json::from_slice(bytes).map_err(DecodeError::Malformed)?;
    let chain = ChainStore::from_records(records).map_err(DecodeError::Linkage)?;
    Ok(chain.into_records())
}
