//! Error types for lanemath.
//!
//! The numeric core never fails: domain violations propagate as NaN/Inf and
//! precondition violations are debug assertions. Only the edges that talk to
//! caller-provided slices or configuration sources return [`Result`].

use thiserror::Error;

use crate::config::ConfigError;

/// lanemath error types.
#[derive(Error, Debug)]
pub enum Error {
    /// A slice handed to a load or write held fewer lanes than required.
    #[error("Slice too short: expected at least {expected} lanes, got {actual}")]
    SliceLength {
        /// Lanes required by the operation.
        expected: usize,
        /// Lanes available in the slice.
        actual: usize,
    },

    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for lanemath operations.
pub type Result<T> = std::result::Result<T, Error>;
