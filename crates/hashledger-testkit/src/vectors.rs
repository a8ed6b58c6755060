//! Golden test vectors for deterministic verification.
//!
//! Each vector pins the digest of one sealed record. Any implementation that
//! reads or writes the same data file must reproduce these values exactly.

use hashledger_core::{Link, Record, Timestamp, Transfer};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub sender: &'static str,
    pub receiver: &'static str,
    /// Amount exactly as entered.
    pub amount: &'static str,
    pub block_number: u64,
    pub timestamp: &'static str,
    /// Link to the predecessor (16 hex).
    pub previous: &'static str,
    /// Expected stored amount.
    pub expected_amount: &'static str,
    /// Expected digest (64 hex).
    pub expected_hash: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "genesis transfer",
            sender: "Alice",
            receiver: "Bob",
            amount: "10.5",
            block_number: 1,
            timestamp: "2024-01-15 09:30:00",
            previous: "0000000000000000",
            expected_amount: "10.50",
            expected_hash: "1ed97b3fe92e1f68bafe97312982680140f797a5724fb9b6c8b5f3a20795f958",
        },
        GoldenVector {
            name: "second transfer links to genesis",
            sender: "Bob",
            receiver: "Carol",
            amount: "3",
            block_number: 2,
            timestamp: "2024-01-15 09:31:00",
            previous: "1ed97b3fe92e1f68",
            expected_amount: "3.00",
            expected_hash: "89fa96b38f816529bf08e4b5aa29723f56619c1bd7a6a6cb2f967c684065b6d1",
        },
        GoldenVector {
            // Same stored amount as the genesis vector, different digest.
            name: "digest covers amount as entered",
            sender: "Alice",
            receiver: "Bob",
            amount: "10.50",
            block_number: 1,
            timestamp: "2024-01-15 09:30:00",
            previous: "0000000000000000",
            expected_amount: "10.50",
            expected_hash: "54d5a046cab921a9da783001a2b3ff4ceb9c3b107fd27a3ba4a33d1589a397cd",
        },
        GoldenVector {
            name: "negative amount on a leap day",
            sender: "Dave",
            receiver: "Erin",
            amount: "-4",
            block_number: 1,
            timestamp: "2024-02-29 23:59:59",
            previous: "0000000000000000",
            expected_amount: "-4.00",
            expected_hash: "92afc59726076c6340f99fddab69d1cccf93ddb67d879899a68f9214b6300ad1",
        },
        GoldenVector {
            name: "non-ascii parties and sub-cent amount",
            sender: "Zoë Müller",
            receiver: "李雷",
            amount: "0.001",
            block_number: 3,
            timestamp: "2024-12-31 00:00:00",
            previous: "89fa96b38f816529",
            expected_amount: "0.00",
            expected_hash: "e51637eb02f066a888d7fd62988a494370cc09a35c95d3046c57410fc640767c",
        },
    ]
}

/// Seal the record a golden vector describes.
pub fn record_from_vector(vector: &GoldenVector) -> Record {
    let transfer = Transfer::parse(vector.sender, vector.receiver, vector.amount)
        .expect("golden vector transfer is valid");
    let previous = Link::from_hex(vector.previous).expect("golden vector link is valid hex");
    let timestamp = Timestamp::parse(vector.timestamp).expect("golden vector timestamp is valid");

    Record::seal(&transfer, vector.block_number, previous, timestamp)
}

/// Check every golden vector, returning `(name, matches, actual_hash)`.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let record = record_from_vector(v);
            let hex = record.hash().to_hex();
            let matches = hex == v.expected_hash && record.amount().as_str() == v.expected_amount;
            (v.name.to_string(), matches, hex)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, hex) in verify_all_vectors() {
            assert!(matches, "vector '{}' produced {}", name, hex);
        }
    }

    #[test]
    fn test_chained_vectors_link_up() {
        let vectors = all_vectors();
        let genesis = record_from_vector(&vectors[0]);
        let second = record_from_vector(&vectors[1]);

        assert_eq!(second.previous_hash(), genesis.hash().link());
        assert_eq!(vectors[4].previous, &vectors[1].expected_hash[..16]);
    }

    #[test]
    fn test_vectors_are_deterministic() {
        for vector in all_vectors() {
            let r1 = record_from_vector(&vector);
            let r2 = record_from_vector(&vector);
            assert_eq!(r1.hash(), r2.hash(), "vector '{}'", vector.name);
        }
    }
}
