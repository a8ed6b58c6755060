//! Chain verification for audit tooling.
//!
//! Walks a record sequence and reports the first broken invariant instead of
//! stopping at a bare error, so operators can see where a chain went wrong.

use std::fmt;

use crate::record::Record;
use crate::types::Link;

/// Result of verifying a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainVerification {
    /// Number of records examined.
    pub record_count: usize,

    /// Index of the first invalid record, if any.
    pub first_invalid_index: Option<usize>,

    /// Kind of the first problem found.
    pub error_type: Option<ChainErrorType>,

    /// Human-readable description of the problem.
    pub error_message: Option<String>,
}

impl ChainVerification {
    fn valid(record_count: usize) -> Self {
        Self {
            record_count,
            first_invalid_index: None,
            error_type: None,
            error_message: None,
        }
    }

    fn invalid(record_count: usize, index: usize, error_type: ChainErrorType, message: String) -> Self {
        Self {
            record_count,
            first_invalid_index: Some(index),
            error_type: Some(error_type),
            error_message: Some(message),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error_type.is_none()
    }
}

/// Kinds of chain damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainErrorType {
    /// First record doesn't carry the genesis sentinel.
    InvalidGenesis,
    /// Block numbers are not exactly 1, 2, 3, ...
    SequenceGap,
    /// A record's previous hash doesn't match its predecessor's digest.
    ChainBroken,
}

impl fmt::Display for ChainErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainErrorType::InvalidGenesis => write!(f, "invalid_genesis"),
            ChainErrorType::SequenceGap => write!(f, "sequence_gap"),
            ChainErrorType::ChainBroken => write!(f, "chain_broken"),
        }
    }
}

/// Verify sequence numbering and linkage of a chain.
///
/// Digests themselves are not recomputed: records store the normalized
/// amount, not the raw text the digest covers.
pub fn verify_chain(records: &[Record]) -> ChainVerification {
    let count = records.len();

    for (index, record) in records.iter().enumerate() {
        let expected_seq = index as u64 + 1;
        if record.block_number() != expected_seq {
            return ChainVerification::invalid(
                count,
                index,
                ChainErrorType::SequenceGap,
                format!(
                    "record {} has block number {}, expected {}",
                    index,
                    record.block_number(),
                    expected_seq
                ),
            );
        }

        match index.checked_sub(1).map(|prev| &records[prev]) {
            None => {
                if record.previous_hash() != Link::GENESIS {
                    return ChainVerification::invalid(
                        count,
                        index,
                        ChainErrorType::InvalidGenesis,
                        format!(
                            "genesis record links to {}, expected {}",
                            record.previous_hash(),
                            Link::GENESIS
                        ),
                    );
                }
            }
            Some(previous) => {
                let expected_link = previous.hash().link();
                if record.previous_hash() != expected_link {
                    return ChainVerification::invalid(
                        count,
                        index,
                        ChainErrorType::ChainBroken,
                        format!(
                            "block {} links to {}, expected {}",
                            record.block_number(),
                            record.previous_hash(),
                            expected_link
                        ),
                    );
                }
            }
        }
    }

    ChainVerification::valid(count)
}
