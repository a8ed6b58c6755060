//! On-disk behaviour of the JSON file store.

use std::fs;

use hashledger_core::{ChainStore, LinkageViolation, Record, Timestamp, Transfer};
use hashledger_store::{CorruptStoreError, JsonFileStore, LoadOutcome, Persistence, StoreError};
use tempfile::TempDir;

fn sample_chain(n: usize) -> Vec<Record> {
    let mut chain = ChainStore::new();
    let t = Timestamp::parse("2024-01-15 09:30:00").unwrap();
    for i in 0..n {
        let transfer = Transfer::parse("Alice", "Bob", &format!("{}.5", i)).unwrap();
        let record = Record::seal(&transfer, chain.next_block_number(), chain.next_link(), t);
        chain.append(record).unwrap();
    }
    chain.into_records()
}

fn store_in(dir: &TempDir) -> JsonFileStore {
    JsonFileStore::new(dir.path().join("blockchain_data.json"))
}

#[test]
fn test_missing_file_is_empty_not_error() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let outcome = store.load();
    assert!(matches!(outcome, LoadOutcome::Missing));
    assert!(outcome.records().is_empty());
    assert!(outcome.corruption().is_none());
}

#[test]
fn test_save_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let records = sample_chain(5);

    store.save(&records).unwrap();

    match store.load() {
        LoadOutcome::Loaded(loaded) => assert_eq!(loaded, records),
        other => panic!("expected loaded chain, got {:?}", other),
    }
}

#[test]
fn test_empty_chain_roundtrip() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.save(&[]).unwrap();
    assert!(matches!(store.load(), LoadOutcome::Loaded(r) if r.is_empty()));
}

#[test]
fn test_save_replaces_whole_file() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.save(&sample_chain(10)).unwrap();
    let shorter = sample_chain(2);
    store.save(&shorter).unwrap();

    assert_eq!(store.load().records(), &shorter[..]);
}

#[test]
fn test_save_leaves_no_temp_files() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.save(&sample_chain(3)).unwrap();
    store.save(&sample_chain(4)).unwrap();

    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec!["blockchain_data.json"]);
}

#[test]
fn test_stray_temp_file_does_not_affect_load() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let records = sample_chain(2);
    store.save(&records).unwrap();

    // What an interrupted save would leave behind.
    fs::write(dir.path().join(".tmpAbC123"), b"[{\"id\": ").unwrap();

    assert_eq!(store.load().records(), &records[..]);
}

#[test]
fn test_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested/deeper/chain.json"));

    store.save(&sample_chain(1)).unwrap();
    assert_eq!(store.load().records().len(), 1);
}

#[test]
fn test_failed_save_keeps_previous_contents() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("chain.json");
    // A directory at the target path makes the final rename fail.
    fs::create_dir(&target).unwrap();
    fs::write(target.join("keep"), b"untouched").unwrap();

    let store = JsonFileStore::new(&target);
    let result = store.save(&sample_chain(1));

    assert!(matches!(result, Err(StoreError::Io(_))));
    assert_eq!(fs::read(target.join("keep")).unwrap(), b"untouched");
}

#[test]
fn test_malformed_file_is_corrupt_on_every_load() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), b"{ this is not a chain").unwrap();

    for _ in 0..2 {
        let outcome = store.load();
        assert!(outcome.records().is_empty());
        assert!(matches!(
            outcome.corruption(),
            Some(CorruptStoreError::Malformed { .. })
        ));
    }

    assert_eq!(fs::read(store.path()).unwrap(), b"{ this is not a chain");
    assert!(!store.quarantine_path().exists());
}

#[test]
fn test_save_after_corrupt_load_sets_file_aside() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), b"{ this is not a chain").unwrap();
    assert!(store.load().is_corrupt());

    let records = sample_chain(2);
    store.save(&records).unwrap();

    assert_eq!(
        fs::read(store.quarantine_path()).unwrap(),
        b"{ this is not a chain"
    );
    assert_eq!(store.load().records(), &records[..]);

    // Only the corrupt file is set aside; later saves just replace.
    store.save(&sample_chain(3)).unwrap();
    assert_eq!(
        fs::read(store.quarantine_path()).unwrap(),
        b"{ this is not a chain"
    );
}

#[test]
fn test_repeated_corruption_keeps_earlier_evidence() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    fs::write(store.path(), b"first").unwrap();
    assert!(store.load().is_corrupt());
    store.save(&sample_chain(1)).unwrap();

    fs::write(store.path(), b"second").unwrap();
    assert!(store.load().is_corrupt());
    store.save(&sample_chain(1)).unwrap();

    let numbered = dir.path().join("blockchain_data.json.corrupt.1");
    assert_eq!(fs::read(store.quarantine_path()).unwrap(), b"first");
    assert_eq!(fs::read(numbered).unwrap(), b"second");
}

#[test]
fn test_quarantine_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir).quarantine_corrupt(false);
    fs::write(store.path(), b"[1, 2, 3]").unwrap();

    assert!(store.load().is_corrupt());
    store.save(&sample_chain(1)).unwrap();

    assert!(!store.quarantine_path().exists());
    assert_eq!(store.load().records().len(), 1);
}

#[test]
fn test_unreadable_store_is_never_moved() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("chain.json");
    fs::create_dir(&target).unwrap();
    let store = JsonFileStore::new(&target);

    assert!(store.load().is_corrupt());
    assert!(store.save(&sample_chain(1)).is_err());
    assert!(target.is_dir());
    assert!(!store.quarantine_path().exists());
}

#[test]
fn test_broken_linkage_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir).quarantine_corrupt(false);

    let mut records = sample_chain(3);
    records.remove(1);
    let tampered = serde_json::to_vec_pretty(&records).unwrap();
    fs::write(store.path(), tampered).unwrap();

    let outcome = store.load();
    assert!(outcome.records().is_empty());
    assert!(matches!(
        outcome.corruption(),
        Some(CorruptStoreError::Linkage {
            source: LinkageViolation::InvalidSequence { expected: 2, got: 3 },
            ..
        })
    ));
}

#[test]
fn test_unreadable_store_is_corrupt() {
    let dir = TempDir::new().unwrap();
    // Reading a directory as a file fails with something other than NotFound.
    let store = JsonFileStore::new(dir.path());

    let outcome = store.load();
    assert!(matches!(
        outcome.corruption(),
        Some(CorruptStoreError::Unreadable { .. })
    ));
    assert!(dir.path().exists());
}

#[test]
fn test_erase() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.save(&sample_chain(2)).unwrap();
    store.erase().unwrap();
    assert!(!store.path().exists());
    assert!(matches!(store.load(), LoadOutcome::Missing));

    // Erasing again is fine.
    store.erase().unwrap();
}

#[test]
fn test_reads_document_written_elsewhere() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let document = r#"[
  {
    "id": "7d444840-9dc0-11d1-b245-5ffdce74fad2",
    "blockNumber": 1,
    "sender": "Alice",
    "receiver": "Bob",
    "amount": "10.50",
    "timestamp": "2024-01-15 09:30:00",
    "previousHash": "0000000000000000",
    "hash": "1ed97b3fe92e1f68bafe97312982680140f797a5724fb9b6c8b5f3a20795f958"
  }
]"#;
    fs::write(store.path(), document).unwrap();

    let records = store.load().into_parts().0;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sender(), "Alice");
    assert_eq!(records[0].amount().as_str(), "10.50");

    // Saving it back reproduces the same bytes.
    store.save(&records).unwrap();
    assert_eq!(fs::read_to_string(store.path()).unwrap(), document);
}
