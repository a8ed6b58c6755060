//! The chain service: validated, linked, persisted appends.
//!
//! `ChainService` owns the in-memory chain and the durable store. Every
//! operation returns a [`Status`]; the `try_*` variants return typed errors
//! for callers that want them.

use hashledger_core::{
    verify_chain, ChainStore, ChainVerification, Digest, Record, Timestamp, Transfer,
    ValidationError,
};
use hashledger_store::{CorruptStoreError, JsonFileStore, LoadOutcome, Persistence, StoreError};
use tracing::{debug, error, info, warn};

use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::status::{Phase, Status};

/// What an append did.
#[derive(Debug)]
pub struct AppendReport {
    /// Block number of the new record.
    pub block_number: u64,
    /// Digest of the new record.
    pub digest: Digest,
    /// Why the chain could not be saved, if it couldn't. The record stays
    /// appended in memory either way.
    pub save_error: Option<StoreError>,
}

impl AppendReport {
    pub fn is_persisted(&self) -> bool {
        self.save_error.is_none()
    }
}

/// The ledger: an in-memory chain kept in sync with a durable store.
pub struct ChainService<P: Persistence> {
    chain: ChainStore,
    persistence: P,
    status: Status,
}

impl ChainService<JsonFileStore> {
    /// Open the file-backed ledger described by `config`.
    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::open(config.open_store())
    }
}

impl<P: Persistence> ChainService<P> {
    /// Load the stored chain and start a service around it.
    ///
    /// Never fails: a missing store gives an empty chain, and a corrupt one
    /// gives an empty chain with a warning status. Loading doesn't modify the
    /// store.
    pub fn open(persistence: P) -> Self {
        let (chain, status) = match load_chain(&persistence) {
            Ok(chain) => (chain, Status::ready()),
            Err(err) => (ChainStore::new(), corrupt_status(&err)),
        };
        Self {
            chain,
            persistence,
            status,
        }
    }

    /// Like [`ChainService::open`], but a corrupt store is an error.
    pub fn try_open(persistence: P) -> Result<Self> {
        let chain = load_chain(&persistence)?;
        Ok(Self {
            chain,
            persistence,
            status: Status::ready(),
        })
    }

    /// Read-only view of the chain.
    pub fn chain(&self) -> &ChainStore {
        &self.chain
    }

    /// The status of the most recent operation.
    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Check the sequence and linkage of the current chain.
    pub fn verify(&self) -> ChainVerification {
        verify_chain(self.chain.all())
    }

    /// Append a transfer stamped with the current time.
    pub fn append_record(&mut self, sender: &str, receiver: &str, amount: &str) -> Status {
        self.append_record_at(sender, receiver, amount, Timestamp::now())
    }

    /// Append a transfer with an explicit timestamp.
    pub fn append_record_at(
        &mut self,
        sender: &str,
        receiver: &str,
        amount: &str,
        timestamp: Timestamp,
    ) -> Status {
        let status = match self.try_append_at(sender, receiver, amount, timestamp) {
            Ok(report) => match &report.save_error {
                None => Status::success(
                    Phase::Idle,
                    format!("Block #{} added & saved", report.block_number),
                )
                .with_block(report.block_number),
                Some(_) => Status::warning(
                    Phase::Persisting,
                    format!("Block #{} added (failed to save)", report.block_number),
                )
                .with_block(report.block_number),
            },
            Err(LedgerError::Validation(err)) => {
                Status::error(Phase::Validating, validation_message(&err))
            }
            Err(err) => Status::error(Phase::Appending, format!("Internal error: {}", err)),
        };
        self.report(status)
    }

    /// Append a transfer stamped with the current time, returning typed results.
    pub fn try_append(
        &mut self,
        sender: &str,
        receiver: &str,
        amount: &str,
    ) -> Result<AppendReport> {
        self.try_append_at(sender, receiver, amount, Timestamp::now())
    }

    /// Validate, link, append and persist one transfer.
    ///
    /// A validation failure leaves everything untouched. A save failure does
    /// not roll the append back; it is returned in [`AppendReport::save_error`].
    pub fn try_append_at(
        &mut self,
        sender: &str,
        receiver: &str,
        amount: &str,
        timestamp: Timestamp,
    ) -> Result<AppendReport> {
        let transfer = Transfer::parse(sender, receiver, amount).map_err(|err| {
            debug!(error = %err, "rejected transfer");
            err
        })?;

        let block_number = self.chain.next_block_number();
        let previous = self.chain.next_link();
        let record = Record::seal(&transfer, block_number, previous, timestamp);
        let digest = record.hash();

        if let Err(violation) = self.chain.append(record) {
            error!(error = %violation, "sealed record does not fit the chain");
            return Err(violation.into());
        }

        let save_error = match self.persistence.save(self.chain.all()) {
            Ok(()) => {
                info!(block = block_number, digest = %digest, "appended and saved");
                None
            }
            Err(err) => {
                warn!(
                    block = block_number,
                    error = %err,
                    "appended in memory, but the chain was not saved"
                );
                Some(err)
            }
        };

        Ok(AppendReport {
            block_number,
            digest,
            save_error,
        })
    }

    /// Save the current chain again. Used to retry after a failed save.
    pub fn save(&mut self) -> Status {
        let status = match self.try_save() {
            Ok(()) => Status::success(
                Phase::Idle,
                format!("Chain saved ({} blocks)", self.chain.count()),
            ),
            Err(err) => Status::warning(Phase::Persisting, format!("Failed to save chain: {}", err)),
        };
        self.report(status)
    }

    pub fn try_save(&mut self) -> Result<()> {
        self.persistence.save(self.chain.all()).map_err(|err| {
            warn!(error = %err, "failed to save chain");
            LedgerError::from(err)
        })?;
        info!(records = self.chain.count(), "saved chain");
        Ok(())
    }

    /// Clear the chain and erase the durable store.
    pub fn reset(&mut self) -> Status {
        let status = match self.try_reset() {
            Ok(()) => Status::info(Phase::Idle, "Local data cleared."),
            Err(err) => Status::error(
                Phase::Resetting,
                format!("Chain cleared, but stored data could not be erased: {}", err),
            ),
        };
        self.report(status)
    }

    /// Clear the chain, then erase the store.
    ///
    /// The in-memory clear stands even if the erase fails.
    pub fn try_reset(&mut self) -> Result<()> {
        let dropped = self.chain.count();
        self.chain.clear();

        self.persistence.erase().map_err(|err| {
            warn!(error = %err, "chain cleared, but the store was not erased");
            LedgerError::from(err)
        })?;
        info!(records = dropped, "reset chain");
        Ok(())
    }

    fn report(&mut self, status: Status) -> Status {
        self.status = status.clone();
        status
    }
}

/// Load and revalidate a stored chain.
///
/// `Persistence::load` implementations are not required to check linkage, so
/// the loaded records go through `ChainStore::from_records` here.
fn load_chain<P: Persistence>(
    persistence: &P,
) -> std::result::Result<ChainStore, CorruptStoreError> {
    let records = match persistence.load() {
        LoadOutcome::Corrupt(err) => return Err(err),
        outcome => outcome.into_parts().0,
    };

    match ChainStore::from_records(records) {
        Ok(chain) => {
            info!(
                location = %persistence.location(),
                records = chain.count(),
                "opened chain"
            );
            Ok(chain)
        }
        Err(source) => {
            let err = CorruptStoreError::Linkage {
                location: persistence.location(),
                source,
            };
            warn!(error = %err, "loaded chain failed linkage checks, starting empty");
            Err(err)
        }
    }
}

fn validation_message(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::EmptyField(_) => "Please fill in all fields.",
        ValidationError::InvalidAmount(_) => "Amount must be a valid number.",
    }
}

fn corrupt_status(err: &CorruptStoreError) -> Status {
    Status::warning(
        Phase::Loading,
        format!("Stored chain could not be loaded, starting empty: {}", err),
    )
}
