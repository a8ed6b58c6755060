//! Ledger configuration.

use std::path::PathBuf;

use hashledger_store::JsonFileStore;

/// Data file used when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "blockchain_data.json";

/// Environment variable that overrides the data file location.
pub const DATA_FILE_ENV: &str = "HASHLEDGER_DATA_FILE";

/// Configuration for a file-backed ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Where the chain is stored.
    pub data_file: PathBuf,
    /// Move a corrupt data file aside on the next save instead of overwriting it.
    pub quarantine_corrupt: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            quarantine_corrupt: true,
        }
    }
}

impl LedgerConfig {
    /// Defaults, with the data file taken from `HASHLEDGER_DATA_FILE` if set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(path) = std::env::var_os(DATA_FILE_ENV).filter(|p| !p.is_empty()) {
            config.data_file = PathBuf::from(path);
        }
        config
    }

    /// Use a different data file.
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Enable or disable quarantine of corrupt data files.
    pub fn with_quarantine(mut self, enabled: bool) -> Self {
        self.quarantine_corrupt = enabled;
        self
    }

    /// Build the file store this configuration describes.
    pub fn open_store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.data_file).quarantine_corrupt(self.quarantine_corrupt)
    }
}
