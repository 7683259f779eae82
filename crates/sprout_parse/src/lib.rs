//! Parser combinators over abstract sequences, with packrat memoization and
//! support for left-recursive grammars.
//!
//! Parsers are values implementing [`Parser`], composed with the methods of
//! [`ParserExt`]. Running one produces a three-way [`ParseResult`]: a success,
//! a recoverable failure that alternation may backtrack over, or a fatal error
//! that it may not. Rules that recurse are declared through [`Recursive`];
//! wrapping a rule in [`Memo`] caches it per position and lets it be left
//! recursive.
//!
//! ```ignore
//! // E := E '+' digit | digit
//! let expr = recursive(|expr: Recursive<char, String>| {
//!     expr.then_left(elem('+'))
//!         .then(satisfy("digit", char::is_ascii_digit))
//!         .map(|(left, right)| format!("({left}+{right})"))
//!         .or(satisfy("digit", char::is_ascii_digit).map(String::from))
//!         .memo()
//! });
//! assert_eq!(expr.phrase().run("1+2+3").into_value(), "((1+2)+3)");
//! ```

mod combinator;
mod context;
mod error;
mod memo;
mod outcome;
mod parser;
mod recursive;
mod sequence;
mod trace;

pub use combinator::{
    elem, fail, raise, satisfy, succeed, Adjust, Adjustment, Elem, Fail, Map, Opt, Or, Phrase,
    Raise, Repeat, Satisfy, Succeed, Then, ThenLeft, ThenRight, END_OF_INPUT_EXPECTED,
};
pub use context::{ContextFlags, ParseContext};
pub use error::{ParseError, SequenceError};
pub use memo::{memo, EntryState, Memo, MemoId, MemoStats, LEFT_RECURSION_MESSAGE};
pub use outcome::{OutcomeKind, ParseResult};
pub use parser::{from_fn, BoxedParser, FromFn, Parser, ParserExt};
pub use recursive::{recursive, Recursive};
pub use sequence::Sequence;
pub use trace::{init_tracing, Trace};
