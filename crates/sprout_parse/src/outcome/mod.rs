//! Three-way parse outcome.
//!
//! | Variant | Value | Backtrack? | Meaning |
//! |---------|-------|------------|---------|
//! | `Success` | yes | n/a | Matched; `rest` is the unconsumed input |
//! | `Failure` | no | yes | This alternative did not match here; try a sibling |
//! | `Error` | no | no | Committed and wrong; siblings must not be tried |
//!
//! Every variant carries the remainder. For `Failure` and `Error` this is
//! normally the position the attempt started from, or the position where a
//! leaf gave up after skipping leading whitespace.
//!
//! ## Propagation
//!
//! Hand-written parsers use [`chain!`](crate::chain) to take the value out of
//! a `Success` and return any other outcome, re-typed, to their caller:
//!
//! ```ignore
//! let (key, rest) = chain!(self.key.parse(input, cx));
//! let (value, rest) = chain!(self.value.parse(&rest, cx));
//! ParseResult::success((key, value), rest)
//! ```

use std::fmt;

use crate::error::ParseError;
use crate::sequence::Sequence;

/// The outcome of running a parser over a [`Sequence`].
#[derive(PartialEq)]
pub enum ParseResult<T, U> {
    /// Matched, producing `value` and leaving `rest` unconsumed.
    Success { value: U, rest: Sequence<T> },

    /// Did not match. Alternation, optional and repetition absorb it.
    Failure { message: String, rest: Sequence<T> },

    /// Did not match, fatally. Propagates through every combinator.
    Error { message: String, rest: Sequence<T> },
}

/// Which of the three outcomes a [`ParseResult`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Success,
    Failure,
    Error,
}

impl OutcomeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            OutcomeKind::Success => "success",
            OutcomeKind::Failure => "failure",
            OutcomeKind::Error => "error",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T, U> ParseResult<T, U> {
    // === Constructors ===

    #[inline]
    pub fn success(value: U, rest: Sequence<T>) -> Self {
        Self::Success { value, rest }
    }

    #[cold]
    pub fn failure(message: impl Into<String>, rest: Sequence<T>) -> Self {
        Self::Failure {
            message: message.into(),
            rest,
        }
    }

    #[cold]
    pub fn error(message: impl Into<String>, rest: Sequence<T>) -> Self {
        Self::Error {
            message: message.into(),
            rest,
        }
    }

    // === Predicates ===

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Success { .. } => OutcomeKind::Success,
            Self::Failure { .. } => OutcomeKind::Failure,
            Self::Error { .. } => OutcomeKind::Error,
        }
    }

    // === Accessors ===

    /// The unconsumed input carried by every variant.
    #[inline]
    pub fn rest(&self) -> &Sequence<T> {
        match self {
            Self::Success { rest, .. } | Self::Failure { rest, .. } | Self::Error { rest, .. } => {
                rest
            }
        }
    }

    pub fn into_rest(self) -> Sequence<T> {
        match self {
            Self::Success { rest, .. } | Self::Failure { rest, .. } | Self::Error { rest, .. } => {
                rest
            }
        }
    }

    /// The parsed value.
    ///
    /// # Panics
    ///
    /// Panics on `Failure` or `Error`: asking a non-match for its value is a
    /// bug in the caller.
    #[track_caller]
    pub fn value(&self) -> &U {
        match self {
            Self::Success { value, .. } => value,
            Self::Failure { message, .. } => {
                panic!("called `ParseResult::value()` on a `Failure`: {message}")
            }
            Self::Error { message, .. } => {
                panic!("called `ParseResult::value()` on an `Error`: {message}")
            }
        }
    }

    /// Owned form of [`value`](Self::value).
    ///
    /// # Panics
    ///
    /// Panics on `Failure` or `Error`.
    #[track_caller]
    pub fn into_value(self) -> U {
        match self {
            Self::Success { value, .. } => value,
            Self::Failure { message, .. } => {
                panic!("called `ParseResult::into_value()` on a `Failure`: {message}")
            }
            Self::Error { message, .. } => {
                panic!("called `ParseResult::into_value()` on an `Error`: {message}")
            }
        }
    }

    /// The diagnostic message.
    ///
    /// # Panics
    ///
    /// Panics on `Success`, which carries no message.
    #[track_caller]
    pub fn message(&self) -> &str {
        match self {
            Self::Failure { message, .. } | Self::Error { message, .. } => message,
            Self::Success { .. } => panic!("called `ParseResult::message()` on a `Success`"),
        }
    }

    /// The value, discarding any non-success.
    pub fn ok(self) -> Option<U> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Failure { .. } | Self::Error { .. } => None,
        }
    }

    // === Transformations ===

    /// Map the success value. Non-success outcomes are re-typed unchanged.
    pub fn map<V, F: FnOnce(U) -> V>(self, f: F) -> ParseResult<T, V> {
        match self {
            Self::Success { value, rest } => ParseResult::Success {
                value: f(value),
                rest,
            },
            Self::Failure { message, rest } => ParseResult::Failure { message, rest },
            Self::Error { message, rest } => ParseResult::Error { message, rest },
        }
    }

    /// Split a success into its value and remainder, or hand back the
    /// non-success re-typed for the caller's output.
    pub fn into_success<V>(self) -> Result<(U, Sequence<T>), ParseResult<T, V>> {
        match self {
            Self::Success { value, rest } => Ok((value, rest)),
            Self::Failure { message, rest } => Err(ParseResult::Failure { message, rest }),
            Self::Error { message, rest } => Err(ParseResult::Error { message, rest }),
        }
    }

    /// Replace the message of a `Failure`. Other outcomes pass through.
    #[must_use]
    pub fn with_failure_message(self, message: impl Into<String>) -> Self {
        match self {
            Self::Failure { rest, .. } => Self::Failure {
                message: message.into(),
                rest,
            },
            other => other,
        }
    }

    /// Replace the message of an `Error`. Other outcomes pass through.
    #[must_use]
    pub fn with_error_message(self, message: impl Into<String>) -> Self {
        match self {
            Self::Error { rest, .. } => Self::Error {
                message: message.into(),
                rest,
            },
            other => other,
        }
    }

    /// Demote an `Error` to a `Failure`, keeping message and remainder.
    #[must_use]
    pub fn as_failure(self) -> Self {
        match self {
            Self::Error { message, rest } => Self::Failure { message, rest },
            other => other,
        }
    }

    /// Promote a `Failure` to an `Error`, keeping message and remainder.
    #[must_use]
    pub fn as_error(self) -> Self {
        match self {
            Self::Failure { message, rest } => Self::Error { message, rest },
            other => other,
        }
    }

    /// Convert to `Result`, dropping the remainder of a success.
    pub fn into_result(self) -> Result<U, ParseError> {
        match self {
            Self::Success { value, .. } => Ok(value),
            Self::Failure { message, rest } => Err(ParseError::Failure {
                message,
                offset: rest.offset(),
            }),
            Self::Error { message, rest } => Err(ParseError::Error {
                message,
                offset: rest.offset(),
            }),
        }
    }
}

// === Conversions ===

impl<T, U> From<ParseResult<T, U>> for Result<U, ParseError> {
    fn from(outcome: ParseResult<T, U>) -> Self {
        outcome.into_result()
    }
}

impl<T, U: Clone> Clone for ParseResult<T, U> {
    fn clone(&self) -> Self {
        match self {
            Self::Success { value, rest } => Self::Success {
                value: value.clone(),
                rest: rest.clone(),
            },
            Self::Failure { message, rest } => Self::Failure {
                message: message.clone(),
                rest: rest.clone(),
            },
            Self::Error { message, rest } => Self::Error {
                message: message.clone(),
                rest: rest.clone(),
            },
        }
    }
}

impl<T: fmt::Debug, U: fmt::Debug> fmt::Debug for ParseResult<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { value, rest } => f
                .debug_struct("Success")
                .field("value", value)
                .field("rest", rest)
                .finish(),
            Self::Failure { message, rest } => f
                .debug_struct("Failure")
                .field("message", message)
                .field("rest", rest)
                .finish(),
            Self::Error { message, rest } => f
                .debug_struct("Error")
                .field("message", message)
                .field("rest", rest)
                .finish(),
        }
    }
}

// === Propagation Macro ===

/// Take the value and remainder out of a `Success`, or return the outcome
/// from the enclosing function.
///
/// The enclosing function must return a `ParseResult` over the same input
/// type; the non-success is re-typed to its output.
///
/// ```ignore
/// fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, (A, B)> {
///     let (a, rest) = chain!(self.first.parse(input, cx));
///     let (b, rest) = chain!(self.second.parse(&rest, cx));
///     ParseResult::success((a, b), rest)
/// }
/// ```
#[macro_export]
macro_rules! chain {
    ($outcome:expr) => {
        match $crate::ParseResult::into_success($outcome) {
            Ok(parts) => parts,
            Err(other) => return other,
        }
    };
}
