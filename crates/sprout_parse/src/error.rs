//! Error types.
//!
//! Grammar-level non-matches are values ([`ParseResult::Failure`] and
//! [`ParseResult::Error`]). The types here are for callers that want a
//! `std::error::Error` out of a finished parse, and for the checked
//! [`Sequence`] accessors.
//!
//! [`ParseResult::Failure`]: crate::ParseResult::Failure
//! [`ParseResult::Error`]: crate::ParseResult::Error
//! [`Sequence`]: crate::Sequence

use thiserror::Error;

/// A non-success parse outcome converted into an error value.
///
/// `offset` is the absolute position of the outcome's remainder in the
/// backing collection.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Backtrackable non-match that reached the caller.
    #[error("parse failure at offset {offset}: {message}")]
    Failure { message: String, offset: usize },

    /// Fatal non-match.
    #[error("parse error at offset {offset}: {message}")]
    Error { message: String, offset: usize },
}

impl ParseError {
    /// The diagnostic message.
    pub fn message(&self) -> &str {
        match self {
            Self::Failure { message, .. } | Self::Error { message, .. } => message,
        }
    }

    /// Absolute offset of the remainder the outcome carried.
    pub fn offset(&self) -> usize {
        match self {
            Self::Failure { offset, .. } | Self::Error { offset, .. } => *offset,
        }
    }

    /// Returns `true` for the fatal variant.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Out-of-range access on a [`Sequence`](crate::Sequence).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("range {start}..{end} out of bounds for sequence of length {len}")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },
}
