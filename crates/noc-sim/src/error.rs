//! Error types for noc-sim.

use thiserror::Error;

/// Result type for noc-sim operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running a simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// Mesh state error (bad coordinates, aborted cycle)
    #[error(transparent)]
    Topology(#[from] noc_topology::Error),

    /// Invalid input
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error was caused by caller input.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Error::Topology(e) => e.is_invalid_argument(),
            Error::InvalidArgument(_) => true,
            _ => false,
        }
    }

    /// Whether a cycle was aborted to protect session state.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Error::Topology(noc_topology::Error::InvariantViolation(_))
        )
    }
}
