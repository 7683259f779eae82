//! Sequencing.

use crate::chain;
use crate::context::ParseContext;
use crate::outcome::ParseResult;
use crate::parser::Parser;
use crate::sequence::Sequence;

/// `A` then `B`, producing `(a, b)`.
#[derive(Clone, Debug)]
pub struct Then<A, B> {
    first: A,
    second: B,
}

impl<A, B> Then<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Then { first, second }
    }
}

impl<T, A, B> Parser<T> for Then<A, B>
where
    A: Parser<T>,
    B: Parser<T>,
{
    type Output = (A::Output, B::Output);

    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, Self::Output> {
        let (first, rest) = chain!(self.first.parse(input, cx));
        self.second
            .parse(&rest, cx)
            .map(|second| (first, second))
    }
}

/// `A` then `B`, keeping the value of `A`.
#[derive(Clone, Debug)]
pub struct ThenLeft<A, B> {
    first: A,
    second: B,
}

impl<A, B> ThenLeft<A, B> {
    pub fn new(first: A, second: B) -> Self {
        ThenLeft { first, second }
    }
}

impl<T, A, B> Parser<T> for ThenLeft<A, B>
where
    A: Parser<T>,
    B: Parser<T>,
{
    type Output = A::Output;

    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, A::Output> {
        let (first, rest) = chain!(self.first.parse(input, cx));
        self.second.parse(&rest, cx).map(|_| first)
    }
}

/// `A` then `B`, keeping the value of `B`.
#[derive(Clone, Debug)]
pub struct ThenRight<A, B> {
    first: A,
    second: B,
}

impl<A, B> ThenRight<A, B> {
    pub fn new(first: A, second: B) -> Self {
        ThenRight { first, second }
    }
}

impl<T, A, B> Parser<T> for ThenRight<A, B>
where
    A: Parser<T>,
    B: Parser<T>,
{
    type Output = B::Output;

    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, B::Output> {
        let (_, rest) = chain!(self.first.parse(input, cx));
        self.second.parse(&rest, cx)
    }
}
