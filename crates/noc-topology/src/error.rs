//! Error types for noc-topology.

use thiserror::Error;

/// Result type for noc-topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building or mutating mesh state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A caller-supplied value is outside its permitted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Internal state would have been corrupted; the operation was aborted.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl Error {
    /// Whether this error was caused by caller input.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}
