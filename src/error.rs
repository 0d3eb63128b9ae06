//! Error types for the quote/unquote codec.

use thiserror::Error;

/// Failures reported by [`crate::codec`].
///
/// Both variants are validation failures surfaced to the immediate caller;
/// no partial output is ever returned alongside them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    /// A `%` escape that is truncated or contains a non-hex digit.
    /// Carries the byte offset of the `%` in the input.
    #[error("invalid escape sequence at byte {0}")]
    InvalidEscape(usize),

    /// Input of the wrong shape, e.g. an unrecognized output-kind selector.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias using QuoteError.
pub type Result<T> = std::result::Result<T, QuoteError>;
