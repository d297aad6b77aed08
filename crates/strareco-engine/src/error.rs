//! Error types for the QA engine.

use std::error::Error;
use std::fmt;

use strareco_core::DataError;
use strareco_hist::HistError;

use crate::config::ConfigError;

/// Errors surfaced by [`StrangenessQa`](crate::analysis::StrangenessQa)
/// and [`ShardedRunner`](crate::sharded::ShardedRunner).
///
/// Skippable per-candidate conditions (missing truth, failed cuts,
/// unresolved V0 links) are never errors; they are reported as
/// [`CandidateOutcome`](crate::outcome::CandidateOutcome)s.
#[derive(Debug, PartialEq)]
pub enum QaError {
    /// The batch violates its referential contract.
    Data(DataError),
    /// A histogram fill or merge failed.
    Hist(HistError),
    /// The configuration is invalid.
    Config(ConfigError),
    /// A worker thread could not be started.
    WorkerSpawn {
        /// OS error description.
        reason: String,
    },
    /// A worker thread panicked.
    WorkerPanicked {
        /// Index of the worker.
        worker: usize,
    },
}

impl fmt::Display for QaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(e) => write!(f, "invalid batch: {e}"),
            Self::Hist(e) => write!(f, "histogram error: {e}"),
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::WorkerSpawn { reason } => write!(f, "failed to spawn QA worker: {reason}"),
            Self::WorkerPanicked { worker } => write!(f, "QA worker {worker} panicked"),
        }
    }
}

impl Error for QaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Data(e) => Some(e),
            Self::Hist(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::WorkerSpawn { .. } | Self::WorkerPanicked { .. } => None,
        }
    }
}

impl From<DataError> for QaError {
    fn from(e: DataError) -> Self {
        Self::Data(e)
    }
}

impl From<HistError> for QaError {
    fn from(e: HistError) -> Self {
        Self::Hist(e)
    }
}

impl From<ConfigError> for QaError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
