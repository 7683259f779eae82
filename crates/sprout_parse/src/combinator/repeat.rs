//! Bounded and unbounded repetition.

use crate::chain;
use crate::context::ParseContext;
use crate::outcome::ParseResult;
use crate::parser::Parser;
use crate::sequence::Sequence;

/// Between `min` and `max` matches of `A`, collected in order.
///
/// The first `min` matches are required: any non-success among them is
/// returned as is. After that, a failure ends the repetition and an error
/// propagates. Without a maximum, an optional iteration that succeeds without
/// consuming input also ends it, after keeping its value, so a nullable body
/// cannot spin. With a maximum the loop always runs until `max` or a failure.
#[derive(Clone, Debug)]
pub struct Repeat<A> {
    parser: A,
    min: usize,
    max: Option<usize>,
}

impl<A> Repeat<A> {
    /// # Panics
    ///
    /// Panics if `max < min`.
    #[track_caller]
    pub fn new(parser: A, min: usize, max: Option<usize>) -> Self {
        if let Some(max) = max {
            assert!(
                min <= max,
                "repetition maximum {max} is below its minimum {min}"
            );
        }
        Repeat { parser, min, max }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }
}

impl<T, A> Parser<T> for Repeat<A>
where
    A: Parser<T>,
{
    type Output = Vec<A::Output>;

    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, Self::Output> {
        let mut values = Vec::new();
        let mut rest = input.clone();

        while values.len() < self.min {
            let (value, next) = chain!(self.parser.parse(&rest, cx));
            values.push(value);
            rest = next;
        }

        while self.max.map_or(true, |max| values.len() < max) {
            match self.parser.parse(&rest, cx) {
                ParseResult::Success { value, rest: next } => {
                    let progressed = next.len() < rest.len();
                    values.push(value);
                    rest = next;
                    if !progressed && self.max.is_none() {
                        break;
                    }
                }
                ParseResult::Failure { .. } => break,
                ParseResult::Error { message, rest } => return ParseResult::error(message, rest),
            }
        }

        ParseResult::success(values, rest)
    }
}
