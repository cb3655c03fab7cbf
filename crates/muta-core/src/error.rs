//! Error types for waveform transforms.

use thiserror::Error;

/// Errors raised by the in-process transforms.
///
/// Both kinds are surfaced to the immediate caller; nothing in this crate
/// retries or silently corrects a failing transform.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A caller-supplied argument violates a precondition.
    #[error("invalid parameter: {0}")]
    Parameter(String),

    /// The transform would divide by zero or produce non-finite output.
    #[error("numeric degeneracy: {0}")]
    NumericDegeneracy(String),
}

impl Error {
    /// Create a parameter error.
    pub fn parameter(reason: impl Into<String>) -> Self {
        Error::Parameter(reason.into())
    }

    /// Create a numeric degeneracy error.
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Error::NumericDegeneracy(reason.into())
    }

    /// Returns `true` for [`Error::Parameter`].
    pub fn is_parameter(&self) -> bool {
        matches!(self, Error::Parameter(_))
    }

    /// Returns `true` for [`Error::NumericDegeneracy`].
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Error::NumericDegeneracy(_))
    }
}

/// Convenience result type for waveform transforms.
pub type Result<T> = std::result::Result<T, Error>;
