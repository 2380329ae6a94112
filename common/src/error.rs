//! Error types for the strength service.

use thiserror::Error;

/// Main error type for strength operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrengthError {
    /// Producing a strength snapshot failed.
    #[error("{0}")]
    GenerationFailed(String),
}

impl StrengthError {
    /// Create a generation failure from any displayable cause.
    pub fn generation(cause: impl std::fmt::Display) -> Self {
        StrengthError::GenerationFailed(cause.to_string())
    }
}

/// Result type alias for strength operations.
pub type StrengthResult<T> = std::result::Result<T, StrengthError>;
