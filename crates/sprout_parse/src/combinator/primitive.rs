//! Leaf parsers over single elements, and constant parsers.

use std::fmt;

use crate::context::ParseContext;
use crate::outcome::ParseResult;
use crate::parser::Parser;
use crate::sequence::Sequence;

/// Match one element equal to `expected`.
///
/// The failure message is the element's `Debug` form followed by
/// `expected`, so `elem('a')` fails with `'a' expected`.
pub fn elem<T>(expected: T) -> Elem<T> {
    Elem { expected }
}

#[derive(Clone, Debug)]
pub struct Elem<T> {
    expected: T,
}

impl<T> Parser<T> for Elem<T>
where
    T: PartialEq + Clone + fmt::Debug,
{
    type Output = T;

    fn parse(&self, input: &Sequence<T>, _cx: &mut ParseContext<T>) -> ParseResult<T, T> {
        match input.first() {
            Some(found) if *found == self.expected => {
                ParseResult::success(found.clone(), input.advance(1))
            }
            _ => ParseResult::failure(format!("{:?} expected", self.expected), input.clone()),
        }
    }
}

/// Match one element accepted by `predicate`; fails with
/// `<description> expected`.
pub fn satisfy<T, F>(description: impl Into<String>, predicate: F) -> Satisfy<F>
where
    F: Fn(&T) -> bool,
{
    Satisfy {
        description: description.into(),
        predicate,
    }
}

#[derive(Clone)]
pub struct Satisfy<F> {
    description: String,
    predicate: F,
}

impl<F> fmt::Debug for Satisfy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Satisfy")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<T, F> Parser<T> for Satisfy<F>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    type Output = T;

    fn parse(&self, input: &Sequence<T>, _cx: &mut ParseContext<T>) -> ParseResult<T, T> {
        match input.first() {
            Some(found) if (self.predicate)(found) => {
                ParseResult::success(found.clone(), input.advance(1))
            }
            _ => ParseResult::failure(format!("{} expected", self.description), input.clone()),
        }
    }
}

/// Succeed with a clone of `value` without consuming input.
pub fn succeed<U: Clone>(value: U) -> Succeed<U> {
    Succeed { value }
}

#[derive(Clone, Debug)]
pub struct Succeed<U> {
    value: U,
}

impl<T, U: Clone> Parser<T> for Succeed<U> {
    type Output = U;

    fn parse(&self, input: &Sequence<T>, _cx: &mut ParseContext<T>) -> ParseResult<T, U> {
        ParseResult::success(self.value.clone(), input.clone())
    }
}

/// Always fail with `message`.
pub fn fail<U>(message: impl Into<String>) -> Fail<U> {
    Fail {
        message: message.into(),
        marker: std::marker::PhantomData,
    }
}

pub struct Fail<U> {
    message: String,
    marker: std::marker::PhantomData<fn() -> U>,
}

/// Always return an error with `message`.
pub fn raise<U>(message: impl Into<String>) -> Raise<U> {
    Raise {
        message: message.into(),
        marker: std::marker::PhantomData,
    }
}

pub struct Raise<U> {
    message: String,
    marker: std::marker::PhantomData<fn() -> U>,
}

macro_rules! constant_non_success {
    ($ty:ident, $ctor:ident) => {
        impl<U> Clone for $ty<U> {
            fn clone(&self) -> Self {
                $ty {
                    message: self.message.clone(),
                    marker: std::marker::PhantomData,
                }
            }
        }

        impl<U> fmt::Debug for $ty<U> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($ty))
                    .field("message", &self.message)
                    .finish()
            }
        }

        impl<T, U> Parser<T> for $ty<U> {
            type Output = U;

            fn parse(&self, input: &Sequence<T>, _cx: &mut ParseContext<T>) -> ParseResult<T, U> {
                ParseResult::$ctor(self.message.as_str(), input.clone())
            }
        }
    };
}

constant_non_success!(Fail, failure);
constant_non_success!(Raise, error);
