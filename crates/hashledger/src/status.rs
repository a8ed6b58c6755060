//! Structured results reported to callers of the ledger service.

use std::fmt;

/// Severity of a reported status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLevel::Info => write!(f, "info"),
            StatusLevel::Success => write!(f, "success"),
            StatusLevel::Warning => write!(f, "warning"),
            StatusLevel::Error => write!(f, "error"),
        }
    }
}

/// The stage an operation had reached when it reported.
///
/// An append moves `Validating -> Appending -> Persisting -> Idle`; a status
/// names the stage where it stopped, or `Idle` if it ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Loading,
    Validating,
    Appending,
    Persisting,
    Resetting,
}

/// Outcome of a ledger operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub phase: Phase,
    pub message: String,
    /// Block number of the record the operation appended, if any.
    pub block_number: Option<u64>,
}

impl Status {
    /// The status of a freshly opened ledger.
    pub fn ready() -> Self {
        Self::new(StatusLevel::Info, Phase::Idle, "Ready")
    }

    pub fn new(level: StatusLevel, phase: Phase, message: impl Into<String>) -> Self {
        Self {
            level,
            phase,
            message: message.into(),
            block_number: None,
        }
    }

    pub fn info(phase: Phase, message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Info, phase, message)
    }

    pub fn success(phase: Phase, message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Success, phase, message)
    }

    pub fn warning(phase: Phase, message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Warning, phase, message)
    }

    pub fn error(phase: Phase, message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Error, phase, message)
    }

    /// Attach the block number an append produced.
    pub fn with_block(mut self, block_number: u64) -> Self {
        self.block_number = Some(block_number);
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == StatusLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == StatusLevel::Warning
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}
