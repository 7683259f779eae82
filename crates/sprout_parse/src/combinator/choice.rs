//! Alternation and optionality.

use crate::context::ParseContext;
use crate::outcome::ParseResult;
use crate::parser::Parser;
use crate::sequence::Sequence;

/// `A`, or else `B` from the same position.
///
/// The first success wins; progress of the two branches is never compared.
#[derive(Clone, Debug)]
pub struct Or<A, B> {
    first: A,
    second: B,
}

impl<A, B> Or<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Or { first, second }
    }
}

impl<T, A, B> Parser<T> for Or<A, B>
where
    A: Parser<T>,
    B: Parser<T, Output = A::Output>,
{
    type Output = A::Output;

    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, A::Output> {
        match self.first.parse(input, cx) {
            ParseResult::Failure { .. } => self.second.parse(input, cx),
            decided => decided,
        }
    }
}

/// Zero or one `A`.
#[derive(Clone, Debug)]
pub struct Opt<A> {
    parser: A,
}

impl<A> Opt<A> {
    pub fn new(parser: A) -> Self {
        Opt { parser }
    }
}

impl<T, A> Parser<T> for Opt<A>
where
    A: Parser<T>,
{
    type Output = Option<A::Output>;

    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, Self::Output> {
        match self.parser.parse(input, cx) {
            ParseResult::Success { value, rest } => ParseResult::success(Some(value), rest),
            ParseResult::Failure { .. } => ParseResult::success(None, input.clone()),
            ParseResult::Error { message, rest } => ParseResult::error(message, rest),
        }
    }
}
