//! Single-file JSON implementation of the Persistence trait.
//!
//! This is the primary storage backend. Saves go to a temporary file in the
//! same directory, are fsynced, then renamed over the target, so readers see
//! either the old chain or the new one.
//!
//! Loading never touches the disk. When the last load found a corrupt file,
//! the next save first moves that file aside instead of overwriting it.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use hashledger_core::Record;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::codec;
use crate::error::{CorruptStoreError, Result};
use crate::traits::{LoadOutcome, Persistence};

/// Suffix appended to the file name when a corrupt store is set aside.
pub const QUARANTINE_SUFFIX: &str = "corrupt";

/// A chain stored as one JSON document on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    quarantine_corrupt: bool,
    /// The last load found undecodable content at `path`.
    corrupt_on_disk: AtomicBool,
}

impl JsonFileStore {
    /// Use the file at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quarantine_corrupt: true,
            corrupt_on_disk: AtomicBool::new(false),
        }
    }

    /// Whether a corrupt file is moved aside before the next save overwrites
    /// it (default: on).
    pub fn quarantine_corrupt(mut self, enabled: bool) -> Self {
        self.quarantine_corrupt = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where a corrupt store is moved, e.g. `blockchain_data.json.corrupt`.
    ///
    /// If that file already exists, a numbered name such as
    /// `blockchain_data.json.corrupt.1` is used instead.
    pub fn quarantine_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(QUARANTINE_SUFFIX);
        self.path.with_file_name(name)
    }

    fn free_quarantine_path(&self) -> PathBuf {
        let base = self.quarantine_path();
        let mut candidate = base.clone();
        let mut n = 0u32;
        while candidate.exists() {
            n += 1;
            let mut name = base.clone().into_os_string();
            name.push(format!(".{}", n));
            candidate = PathBuf::from(name);
        }
        candidate
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_atomically(&self, bytes: &[u8]) -> io::Result<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Move a file the last load found corrupt out of the way of a save.
    fn set_aside_corrupt(&self) -> io::Result<()> {
        if !self.quarantine_corrupt || !self.corrupt_on_disk.load(Ordering::Acquire) {
            return Ok(());
        }

        let target = self.free_quarantine_path();
        match fs::rename(&self.path, &target) {
            Ok(()) => warn!(path = %target.display(), "corrupt store moved aside"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(error = %e, "failed to move corrupt store aside, not saving");
                return Err(e);
            }
        }
        self.corrupt_on_disk.store(false, Ordering::Release);
        Ok(())
    }
}

impl Persistence for JsonFileStore {
    fn load(&self) -> LoadOutcome {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no store on disk, starting empty");
                self.corrupt_on_disk.store(false, Ordering::Release);
                return LoadOutcome::Missing;
            }
            Err(source) => {
                let err = CorruptStoreError::Unreadable {
                    location: self.location(),
                    source,
                };
                warn!(error = %err, "store unreadable, starting empty");
                return LoadOutcome::Corrupt(err);
            }
        };

        match codec::decode(&bytes) {
            Ok(records) => {
                debug!(path = %self.path.display(), records = records.len(), "loaded chain");
                self.corrupt_on_disk.store(false, Ordering::Release);
                LoadOutcome::Loaded(records)
            }
            Err(e) => {
                let err = e.into_corrupt(self.location());
                warn!(error = %err, "store corrupt, starting empty");
                self.corrupt_on_disk.store(true, Ordering::Release);
                LoadOutcome::Corrupt(err)
            }
        }
    }

    fn save(&self, records: &[Record]) -> Result<()> {
        let bytes = codec::encode(records)?;
        self.set_aside_corrupt()?;
        self.write_atomically(&bytes)?;
        debug!(
            path = %self.path.display(),
            records = records.len(),
            bytes = bytes.len(),
            "saved chain"
        );
        Ok(())
    }

    fn erase(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "erased store");
                self.corrupt_on_disk.store(false, Ordering::Release);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.corrupt_on_disk.store(false, Ordering::Release);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarantine_path() {
        let store = JsonFileStore::new("/data/blockchain_data.json");
        assert_eq!(
            store.quarantine_path(),
            PathBuf::from("/data/blockchain_data.json.corrupt")
        );
    }

    #[test]
    fn test_bare_file_name_uses_current_dir() {
        let store = JsonFileStore::new("blockchain_data.json");
        assert_eq!(store.parent_dir(), Path::new("."));
    }
}
