//! Error types for data parsing in farmwatch-types.

use thiserror::Error;

/// Errors that can occur when parsing farmwatch values from text.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Unknown theme name.
    #[error("Unknown theme '{0}' (expected 'light' or 'dark')")]
    UnknownTheme(String),

    /// A value could not be interpreted.
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Result type alias using farmwatch-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
