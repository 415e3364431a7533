use core::fmt;

/// Result alias for `kernclust`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the clustering engine and its vector primitives.
///
/// Every variant signals a caller or invariant error. Nothing here is
/// retried; the engine leaves its state untouched when input validation fails.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// Vector length mismatch.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Division by zero (or by a value whose reciprocal is not finite).
    DegenerateDivision {
        /// Which computation hit the degenerate divisor.
        context: &'static str,
    },

    /// Engine capacity must be at least one cluster.
    InvalidCapacity {
        /// Requested capacity.
        requested: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// A point component was NaN or infinite.
    NonFiniteInput {
        /// Index of the first offending component.
        index: usize,
    },

    /// The engine's internal bookkeeping disagrees with its clusters.
    InconsistentState {
        /// What was found to be out of step.
        context: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::DegenerateDivision { context } => {
                write!(f, "degenerate division in {context}")
            }
            Error::InvalidCapacity { requested } => {
                write!(f, "invalid capacity {requested}: need at least one cluster")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::NonFiniteInput { index } => {
                write!(f, "non-finite value at component {index}")
            }
            Error::InconsistentState { context } => {
                write!(f, "inconsistent engine state: {context}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
