//! ChainStore: the ordered, append-only sequence of records.
//!
//! Every mutation goes through [`ChainStore::append`] or [`ChainStore::clear`],
//! so the sequence and linkage invariants hold at every observable point.

use crate::error::LinkageViolation;
use crate::record::Record;
use crate::types::Link;

/// In-memory record chain, genesis first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainStore {
    records: Vec<Record>,
}

impl ChainStore {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a chain from records, checking every invariant on the way.
    pub fn from_records(records: Vec<Record>) -> Result<Self, LinkageViolation> {
        let mut chain = Self {
            records: Vec::with_capacity(records.len()),
        };
        for record in records {
            chain.append(record)?;
        }
        Ok(chain)
    }

    /// Append a record to the end of the chain.
    ///
    /// Fails if the record's block number is not `count() + 1` or if it does
    /// not link to the current last record (or to the genesis sentinel).
    pub fn append(&mut self, record: Record) -> Result<&Record, LinkageViolation> {
        let expected = self.next_block_number();
        if record.block_number() != expected {
            return Err(LinkageViolation::InvalidSequence {
                expected,
                got: record.block_number(),
            });
        }

        let expected_link = self.next_link();
        if record.previous_hash() != expected_link {
            return Err(LinkageViolation::InvalidLink {
                block_number: record.block_number(),
                expected: expected_link,
                got: record.previous_hash(),
            });
        }

        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// All records, oldest first.
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    /// Consume the chain, yielding its records oldest first.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Drop every record. Irreversible.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Block number the next appended record must carry.
    pub fn next_block_number(&self) -> u64 {
        self.records.len() as u64 + 1
    }

    /// Link the next appended record must carry.
    pub fn next_link(&self) -> Link {
        self.last()
            .map(|record| record.hash().link())
            .unwrap_or(Link::GENESIS)
    }
}

impl<'a> IntoIterator for &'a ChainStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Timestamp;
    use crate::validation::Transfer;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn next_record(chain: &ChainStore, sender: &str, receiver: &str, amount: &str) -> Record {
        let transfer = Transfer::parse(sender, receiver, amount).unwrap();
        Record::seal(
            &transfer,
            chain.next_block_number(),
            chain.next_link(),
            ts("2024-01-15 09:30:00"),
        )
    }

    #[test]
    fn test_empty_chain() {
        let chain = ChainStore::new();
        assert_eq!(chain.count(), 0);
        assert!(chain.last().is_none());
        assert_eq!(chain.next_block_number(), 1);
        assert_eq!(chain.next_link(), Link::GENESIS);
    }

    #[test]
    fn test_contiguous_append() {
        let mut chain = ChainStore::new();

        let r1 = next_record(&chain, "Alice", "Bob", "10.5");
        chain.append(r1.clone()).unwrap();
        let r2 = next_record(&chain, "Bob", "Carol", "3");
        chain.append(r2.clone()).unwrap();

        assert_eq!(chain.count(), 2);
        assert_eq!(chain.all(), &[r1.clone(), r2.clone()]);
        assert_eq!(r2.previous_hash(), r1.hash().link());
        assert_eq!(chain.last(), Some(&r2));
    }

    #[test]
    fn test_rejects_wrong_block_number() {
        let mut chain = ChainStore::new();
        let transfer = Transfer::parse("Alice", "Bob", "1").unwrap();
        let record = Record::seal(&transfer, 2, Link::GENESIS, ts("2024-01-15 09:30:00"));

        assert_eq!(
            chain.append(record),
            Err(LinkageViolation::InvalidSequence {
                expected: 1,
                got: 2
            })
        );
        assert!(chain.is_empty());
    }

    #[test]
    fn test_rejects_wrong_link() {
        let mut chain = ChainStore::new();
        chain.append(next_record(&chain, "Alice", "Bob", "1")).unwrap();

        let transfer = Transfer::parse("Bob", "Carol", "2").unwrap();
        let stale = Record::seal(&transfer, 2, Link::GENESIS, ts("2024-01-15 09:31:00"));

        assert!(matches!(
            chain.append(stale),
            Err(LinkageViolation::InvalidLink { block_number: 2, .. })
        ));
        assert_eq!(chain.count(), 1);
    }

    #[test]
    fn test_genesis_must_use_sentinel() {
        let mut chain = ChainStore::new();
        let transfer = Transfer::parse("Alice", "Bob", "1").unwrap();
        let record = Record::seal(
            &transfer,
            1,
            Link::from_bytes([0x11; 8]),
            ts("2024-01-15 09:30:00"),
        );
        assert!(matches!(
            chain.append(record),
            Err(LinkageViolation::InvalidLink { block_number: 1, .. })
        ));
    }

    #[test]
    fn test_clear_resets_numbering() {
        let mut chain = ChainStore::new();
        chain.append(next_record(&chain, "Alice", "Bob", "1")).unwrap();
        chain.append(next_record(&chain, "Bob", "Carol", "2")).unwrap();

        chain.clear();
        assert!(chain.is_empty());
        assert_eq!(chain.next_block_number(), 1);

        let record = next_record(&chain, "Carol", "Dave", "3");
        assert_eq!(record.previous_hash(), Link::GENESIS);
        chain.append(record).unwrap();
    }

    #[test]
    fn test_from_records_validates() {
        let mut chain = ChainStore::new();
        chain.append(next_record(&chain, "Alice", "Bob", "1")).unwrap();
        chain.append(next_record(&chain, "Bob", "Carol", "2")).unwrap();

        let rebuilt = ChainStore::from_records(chain.all().to_vec()).unwrap();
        assert_eq!(rebuilt, chain);

        let mut reversed = chain.all().to_vec();
        reversed.reverse();
        assert!(ChainStore::from_records(reversed).is_err());
    }
}
