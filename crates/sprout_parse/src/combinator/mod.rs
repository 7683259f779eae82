//! Combinator types returned by [`ParserExt`](crate::ParserExt) and the
//! primitive parsers they are built from.
//!
//! | Combinator | On `Failure` of the inner parser | On `Error` |
//! |---|---|---|
//! | [`Then`], [`ThenLeft`], [`ThenRight`] | propagate | propagate |
//! | [`Or`] | try the alternative at the starting position | propagate |
//! | [`Opt`] | succeed with `None` at the starting position | propagate |
//! | [`Repeat`] | stop, or propagate while below the minimum | propagate |
//! | [`Map`], [`Phrase`] | propagate | propagate |
//! | [`Adjust`] | rewrite per [`Adjustment`] | rewrite per [`Adjustment`] |

mod choice;
mod message;
mod primitive;
mod repeat;
mod then;
mod transform;

pub use choice::{Opt, Or};
pub use message::{Adjust, Adjustment};
pub use primitive::{elem, fail, raise, satisfy, succeed, Elem, Fail, Raise, Satisfy, Succeed};
pub use repeat::Repeat;
pub use then::{Then, ThenLeft, ThenRight};
pub use transform::{Map, Phrase, END_OF_INPUT_EXPECTED};
