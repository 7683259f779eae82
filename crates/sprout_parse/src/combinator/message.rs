//! Rewriting the kind or message of a non-success.

use crate::context::ParseContext;
use crate::outcome::ParseResult;
use crate::parser::Parser;
use crate::sequence::Sequence;

/// How [`Adjust`] rewrites the outcome of its parser. Successes are never
/// touched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Adjustment {
    /// Replace the message of a `Failure`.
    FailureMessage(String),
    /// Replace the message of an `Error`.
    ErrorMessage(String),
    /// Turn an `Error` into a `Failure`.
    AsFailure,
    /// Turn a `Failure` into an `Error`.
    AsError,
}

#[derive(Clone, Debug)]
pub struct Adjust<A> {
    parser: A,
    adjustment: Adjustment,
}

impl<A> Adjust<A> {
    pub fn new(parser: A, adjustment: Adjustment) -> Self {
        Adjust { parser, adjustment }
    }

    pub fn adjustment(&self) -> &Adjustment {
        &self.adjustment
    }
}

impl<T, A> Parser<T> for Adjust<A>
where
    A: Parser<T>,
{
    type Output = A::Output;

    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, A::Output> {
        let outcome = self.parser.parse(input, cx);
        match &self.adjustment {
            Adjustment::FailureMessage(message) => outcome.with_failure_message(message.as_str()),
            Adjustment::ErrorMessage(message) => outcome.with_error_message(message.as_str()),
            Adjustment::AsFailure => outcome.as_failure(),
            Adjustment::AsError => outcome.as_error(),
        }
    }
}
