//! The parser trait and its fluent combinator surface.
//!
//! A parser is an immutable value. All per-run state lives in the
//! [`ParseContext`] threaded through [`Parser::parse`], so one grammar can be
//! shared by any number of parses as long as each has its own context.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::combinator::{
    Adjust, Adjustment, Map, Opt, Or, Phrase, Repeat, Then, ThenLeft, ThenRight,
};
use crate::context::ParseContext;
use crate::memo::Memo;
use crate::outcome::ParseResult;
use crate::sequence::Sequence;
use crate::trace::Trace;

/// Something that can parse a [`Sequence<T>`].
pub trait Parser<T> {
    /// Value produced on success.
    type Output;

    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, Self::Output>;
}

impl<T, P: Parser<T> + ?Sized> Parser<T> for &P {
    type Output = P::Output;

    #[inline]
    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, P::Output> {
        (**self).parse(input, cx)
    }
}

impl<T, P: Parser<T> + ?Sized> Parser<T> for Box<P> {
    type Output = P::Output;

    #[inline]
    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, P::Output> {
        (**self).parse(input, cx)
    }
}

impl<T, P: Parser<T> + ?Sized> Parser<T> for Arc<P> {
    type Output = P::Output;

    #[inline]
    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, P::Output> {
        (**self).parse(input, cx)
    }
}

/// Fluent construction of combinators.
///
/// Implemented for every [`Parser`]. Each method consumes the receiver and
/// returns the combined parser; clone or borrow a parser to use it twice.
pub trait ParserExt<T>: Parser<T> + Sized {
    /// `self` followed by `next`, producing both values.
    fn then<B>(self, next: B) -> Then<Self, B>
    where
        B: Parser<T>,
    {
        Then::new(self, next)
    }

    /// `self` followed by `next`, keeping only the value of `self`.
    fn then_left<B>(self, next: B) -> ThenLeft<Self, B>
    where
        B: Parser<T>,
    {
        ThenLeft::new(self, next)
    }

    /// `self` followed by `next`, keeping only the value of `next`.
    fn then_right<B>(self, next: B) -> ThenRight<Self, B>
    where
        B: Parser<T>,
    {
        ThenRight::new(self, next)
    }

    /// `self`, or `other` from the same position if `self` fails.
    ///
    /// An error from `self` is returned without trying `other`.
    fn or<B>(self, other: B) -> Or<Self, B>
    where
        B: Parser<T, Output = Self::Output>,
    {
        Or::new(self, other)
    }

    /// Zero or one `self`.
    fn opt(self) -> Opt<Self> {
        Opt::new(self)
    }

    /// Zero or more `self`.
    fn rep(self) -> Repeat<Self> {
        Repeat::new(self, 0, None)
    }

    /// One or more `self`.
    fn rep1(self) -> Repeat<Self> {
        Repeat::new(self, 1, None)
    }

    /// Between `min` and `max` (unbounded when `None`) repetitions of `self`.
    ///
    /// # Panics
    ///
    /// Panics if `max < min`.
    #[track_caller]
    fn repeat(self, min: usize, max: Option<usize>) -> Repeat<Self> {
        Repeat::new(self, min, max)
    }

    fn map<F, V>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> V,
    {
        Map::new(self, f)
    }

    /// `self`, which must consume the whole input.
    fn phrase(self) -> Phrase<Self> {
        Phrase::new(self)
    }

    fn with_failure_message(self, message: impl Into<String>) -> Adjust<Self> {
        Adjust::new(self, Adjustment::FailureMessage(message.into()))
    }

    fn with_error_message(self, message: impl Into<String>) -> Adjust<Self> {
        Adjust::new(self, Adjustment::ErrorMessage(message.into()))
    }

    /// Demote errors of `self` to failures.
    fn as_failure(self) -> Adjust<Self> {
        Adjust::new(self, Adjustment::AsFailure)
    }

    /// Promote failures of `self` to errors.
    fn as_error(self) -> Adjust<Self> {
        Adjust::new(self, Adjustment::AsError)
    }

    /// Cache the outcomes of `self` per position and resolve left recursion
    /// through it.
    fn memo(self) -> Memo<Self> {
        Memo::new(self)
    }

    /// Log entry and exit of `self` under `name` when the context has
    /// [`ContextFlags::TRACE`](crate::ContextFlags::TRACE) set.
    fn trace(self, name: impl Into<String>) -> Trace<Self> {
        Trace::new(name, self)
    }

    fn boxed(self) -> BoxedParser<T, Self::Output>
    where
        Self: Send + Sync + 'static,
    {
        BoxedParser::new(self)
    }

    /// Parse `input` with a fresh context.
    fn run(&self, input: impl Into<Sequence<T>>) -> ParseResult<T, Self::Output> {
        let mut cx = ParseContext::new();
        self.parse(&input.into(), &mut cx)
    }
}

impl<T, P: Parser<T>> ParserExt<T> for P {}

/// A type-erased, cheaply cloneable parser.
pub struct BoxedParser<T, U> {
    inner: Arc<dyn Parser<T, Output = U> + Send + Sync>,
}

impl<T, U> BoxedParser<T, U> {
    pub fn new<P>(parser: P) -> Self
    where
        P: Parser<T, Output = U> + Send + Sync + 'static,
    {
        BoxedParser {
            inner: Arc::new(parser),
        }
    }
}

impl<T, U> Clone for BoxedParser<T, U> {
    fn clone(&self) -> Self {
        BoxedParser {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, U> Parser<T> for BoxedParser<T, U> {
    type Output = U;

    #[inline]
    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, U> {
        self.inner.parse(input, cx)
    }
}

impl<T, U> fmt::Debug for BoxedParser<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoxedParser")
    }
}

/// A parser backed by a function.
///
/// ```ignore
/// let digit = from_fn(|input: &Sequence<char>, _cx: &mut ParseContext<char>| {
///     match input.first() {
///         Some(c) if c.is_ascii_digit() => ParseResult::success(*c, input.advance(1)),
///         _ => ParseResult::failure("digit expected", input.clone()),
///     }
/// });
/// ```
pub struct FromFn<F, T> {
    f: F,
    marker: PhantomData<fn(&Sequence<T>)>,
}

pub fn from_fn<T, U, F>(f: F) -> FromFn<F, T>
where
    F: Fn(&Sequence<T>, &mut ParseContext<T>) -> ParseResult<T, U>,
{
    FromFn {
        f,
        marker: PhantomData,
    }
}

impl<F: Clone, T> Clone for FromFn<F, T> {
    fn clone(&self) -> Self {
        FromFn {
            f: self.f.clone(),
            marker: PhantomData,
        }
    }
}

impl<T, U, F> Parser<T> for FromFn<F, T>
where
    F: Fn(&Sequence<T>, &mut ParseContext<T>) -> ParseResult<T, U>,
{
    type Output = U;

    #[inline]
    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, U> {
        (self.f)(input, cx)
    }
}
