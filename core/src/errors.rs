use crate::blockchain::sized_bytes::Bytes32;
use std::io::{Error, ErrorKind};
use thiserror::Error;

/// Coarse classification of a [`ConsensusError`], used when deciding whether a
/// failure condemns a single block or the whole process configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsensusErrorKind {
    Range,
    Config,
    Validation,
    MalformedProof,
    ChallengeMismatch,
    PlotFilterRejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsensusError {
    #[error("{what} out of range: {value} not in [{min}, {max}]")]
    Range {
        what: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
    #[error("invalid consensus configuration: {0}")]
    Config(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("malformed proof of space: {0}")]
    MalformedProof(String),
    #[error("proof of space challenge mismatch: expected {expected}, found {found}")]
    ChallengeMismatch { expected: Bytes32, found: Bytes32 },
    #[error("plot filter rejected input {filter_input} at {prefix_bits} prefix bits")]
    PlotFilterRejected {
        filter_input: Bytes32,
        prefix_bits: u8,
    },
}

impl ConsensusError {
    pub fn range(what: &'static str, value: impl Into<u64>, min: impl Into<u64>, max: impl Into<u64>) -> Self {
        ConsensusError::Range {
            what,
            value: value.into(),
            min: min.into(),
            max: max.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ConsensusErrorKind {
        match self {
            ConsensusError::Range { .. } => ConsensusErrorKind::Range,
            ConsensusError::Config(_) => ConsensusErrorKind::Config,
            ConsensusError::Validation(_) => ConsensusErrorKind::Validation,
            ConsensusError::MalformedProof(_) => ConsensusErrorKind::MalformedProof,
            ConsensusError::ChallengeMismatch { .. } => ConsensusErrorKind::ChallengeMismatch,
            ConsensusError::PlotFilterRejected { .. } => ConsensusErrorKind::PlotFilterRejected,
        }
    }

    /// Configuration errors poison every computation made with the same constants,
    /// everything else only invalidates the block being checked.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.kind() == ConsensusErrorKind::Config
    }
}

impl From<ConsensusError> for Error {
    fn from(value: ConsensusError) -> Self {
        Error::new(ErrorKind::InvalidData, value)
    }
}
