//! Error types for histogram declaration, filling and merging.

use std::error::Error;
use std::fmt;

/// Errors from the histogram registry.
#[derive(Clone, Debug, PartialEq)]
pub enum HistError {
    /// A fill or lookup named a histogram that was never declared.
    UnknownHistogram {
        /// The requested name.
        name: String,
    },
    /// A histogram with this name is already declared.
    DuplicateHistogram {
        /// The duplicated name.
        name: String,
    },
    /// A fill supplied the wrong number of coordinates.
    DimensionMismatch {
        /// Histogram name.
        name: String,
        /// Number of axes of the histogram.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },
    /// Two histograms with the same name have different binning.
    ShapeMismatch {
        /// Histogram name.
        name: String,
    },
    /// An axis definition is unusable.
    InvalidAxis {
        /// Description of the problem.
        reason: String,
    },
}

impl fmt::Display for HistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownHistogram { name } => write!(f, "unknown histogram '{name}'"),
            Self::DuplicateHistogram { name } => {
                write!(f, "histogram '{name}' is already declared")
            }
            Self::DimensionMismatch {
                name,
                expected,
                got,
            } => write!(
                f,
                "histogram '{name}' has {expected} axes but {got} values were supplied"
            ),
            Self::ShapeMismatch { name } => {
                write!(f, "histogram '{name}' has incompatible binning")
            }
            Self::InvalidAxis { reason } => write!(f, "invalid axis: {reason}"),
        }
    }
}

impl Error for HistError {}
