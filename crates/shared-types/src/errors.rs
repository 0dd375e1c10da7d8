//! # Error Types
//!
//! Parse errors for the textual forms of shared identifiers.

use thiserror::Error;

/// Errors raised when parsing an identifier from its hex/decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    /// Input was not valid hexadecimal.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded byte length does not match the identifier width.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Input was not a valid decimal property id.
    #[error("Invalid property id: {0}")]
    InvalidPropertyId(String),
}
