//! Record: one immutable transfer in the chain.
//!
//! A record is sealed exactly once. Its digest covers the sender, receiver,
//! raw amount text, timestamp and previous link, and is never recomputed.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::linker::HashLinker;
use crate::types::{Digest, Link};
use crate::validation::Transfer;

/// Wire format of record timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Capture time of a record, at second granularity, in local time.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// The current local time, truncated to the second.
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    /// Wrap a datetime, dropping any sub-second part.
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self(datetime.with_nanosecond(0).unwrap_or(datetime))
    }

    /// Parse from `YYYY-MM-DD HH:MM:SS`.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).map(Self::from_datetime)
    }

    /// The underlying datetime.
    pub fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let timestamp = Self::parse(&s).map_err(de::Error::custom)?;
        // Reject loose forms like "2024-1-5 9:30:00" so a load/save cycle is lossless.
        if timestamp.to_string() != s {
            return Err(de::Error::custom(format!(
                "timestamp {s:?} is not in {TIMESTAMP_FORMAT} form"
            )));
        }
        Ok(timestamp)
    }
}

/// A transfer amount, normalized to two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    /// Parse and normalize an amount.
    ///
    /// Any finite number is accepted, including negative values.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidAmount(text.to_string());
        let value: f64 = text.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        Ok(Self(format!("{value:.2}")))
    }

    /// The normalized text, e.g. `"10.50"`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A sealed transfer record.
///
/// Fields are only readable; the only ways to obtain a record are
/// [`Record::seal`] and deserializing a stored chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    id: Uuid,
    block_number: u64,
    sender: String,
    receiver: String,
    amount: Amount,
    timestamp: Timestamp,
    previous_hash: Link,
    hash: Digest,
}

impl Record {
    /// Seal a validated transfer at the given chain position.
    pub fn seal(
        transfer: &Transfer,
        block_number: u64,
        previous_hash: Link,
        timestamp: Timestamp,
    ) -> Self {
        Self::seal_with_id(Uuid::new_v4(), transfer, block_number, previous_hash, timestamp)
    }

    /// Seal with a caller-chosen id.
    pub fn seal_with_id(
        id: Uuid,
        transfer: &Transfer,
        block_number: u64,
        previous_hash: Link,
        timestamp: Timestamp,
    ) -> Self {
        let hash = HashLinker::compute(
            transfer.sender(),
            transfer.receiver(),
            transfer.amount_text(),
            &timestamp,
            &previous_hash,
        );

        Self {
            id,
            block_number,
            sender: transfer.sender().to_string(),
            receiver: transfer.receiver().to_string(),
            amount: transfer.amount().clone(),
            timestamp,
            previous_hash,
            hash,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 1-based position in the chain.
    pub fn block_number(&self) -> u64 {
        self.block_number
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Link to the previous record, or [`Link::GENESIS`].
    pub fn previous_hash(&self) -> Link {
        self.previous_hash
    }

    pub fn hash(&self) -> Digest {
        self.hash
    }

    /// Whether this is the first record of a chain.
    pub fn is_genesis(&self) -> bool {
        self.block_number == 1
    }
}
