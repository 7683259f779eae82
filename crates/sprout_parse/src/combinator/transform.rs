//! Value mapping and end-of-input anchoring.

use crate::chain;
use crate::context::ParseContext;
use crate::outcome::ParseResult;
use crate::parser::Parser;
use crate::sequence::Sequence;

/// Failure message of [`Phrase`] when input remains.
pub const END_OF_INPUT_EXPECTED: &str = "end of input expected";

/// `A` with its success value passed through `F`.
#[derive(Clone)]
pub struct Map<A, F> {
    parser: A,
    f: F,
}

impl<A, F> Map<A, F> {
    pub fn new(parser: A, f: F) -> Self {
        Map { parser, f }
    }
}

impl<T, A, F, V> Parser<T> for Map<A, F>
where
    A: Parser<T>,
    F: Fn(A::Output) -> V,
{
    type Output = V;

    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, V> {
        self.parser.parse(input, cx).map(&self.f)
    }
}

/// `A`, required to consume all remaining input.
#[derive(Clone, Debug)]
pub struct Phrase<A> {
    parser: A,
}

impl<A> Phrase<A> {
    pub fn new(parser: A) -> Self {
        Phrase { parser }
    }
}

impl<T, A> Parser<T> for Phrase<A>
where
    A: Parser<T>,
{
    type Output = A::Output;

    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, A::Output> {
        let (value, rest) = chain!(self.parser.parse(input, cx));
        if rest.is_empty() {
            ParseResult::success(value, rest)
        } else {
            ParseResult::failure(END_OF_INPUT_EXPECTED, rest)
        }
    }
}
