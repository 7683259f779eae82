//! Packrat memoization with left-recursion support.
//!
//! [`Memo`] wraps a rule and caches its outcome per input position in the
//! [`ParseContext`]. The cache is keyed by the wrapper's [`MemoId`], which is
//! assigned at construction and shared by clones. Two separately built but
//! identical rules are two keys; one rule referenced from many places is one.
//!
//! # Left recursion
//!
//! A rule that reaches itself at the same position without consuming input
//! would recurse forever. The engine catches the re-entry and answers it with
//! a failure ([`LEFT_RECURSION_MESSAGE`]), so the recursive alternative dies
//! and the rule's base case can match. That first match is the seed. The
//! engine caches it and runs the rule again: this time the recursive call
//! sees the seed and extends it. Each round is kept while it consumes
//! strictly more input, and the last round that did is the result.
//!
//! Rules entered between the outer evaluation and the re-entry depend on the
//! seed that is still growing. Their entries are bypassed: they are never
//! cached and re-run on every visit.
//!
//! ```text
//! E := E '+' num | num        "1+2+3"
//!
//! round 0: E -> E fails (re-entry) | num       seed "1",          rest "+2+3"
//! round 1: E -> seed '+' num                    "(1+2)",          rest "+3"
//! round 2: E -> seed '+' num                    "((1+2)+3)",      rest ""
//! round 3: E -> seed '+' fails | num            "1", no progress, stop
//! ```

mod table;

use std::sync::atomic::{AtomicU64, Ordering};

use sprout_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::context::{ContextFlags, ParseContext};
use crate::outcome::ParseResult;
use crate::parser::Parser;
use crate::sequence::Sequence;

pub use table::{EntryState, MemoStats};
pub(crate) use table::{MemoTable, Recall};

/// Message of the failure returned to a left-recursive re-entry.
pub const LEFT_RECURSION_MESSAGE: &str = "infinite left recursion detected";

static NEXT_MEMO_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a memoized rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct MemoId(u64);

impl MemoId {
    fn fresh() -> Self {
        MemoId(NEXT_MEMO_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A rule whose outcomes are cached per position.
///
/// Built with [`ParserExt::memo`](crate::ParserExt::memo) or [`memo`].
#[derive(Clone, Debug)]
pub struct Memo<P> {
    id: MemoId,
    parser: P,
}

impl<P> Memo<P> {
    pub fn new(parser: P) -> Self {
        Memo {
            id: MemoId::fresh(),
            parser,
        }
    }

    #[inline]
    pub fn id(&self) -> MemoId {
        self.id
    }

    pub fn inner(&self) -> &P {
        &self.parser
    }
}

/// Wrap `parser` in a fresh [`Memo`].
pub fn memo<P>(parser: P) -> Memo<P> {
    Memo::new(parser)
}

impl<T, P> Parser<T> for Memo<P>
where
    T: Eq + 'static,
    P: Parser<T>,
    P::Output: Clone + 'static,
{
    type Output = P::Output;

    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, P::Output> {
        match cx.memo_mut().recall::<P::Output>(self.id, input) {
            Recall::Fresh => self.evaluate(input, cx),
            Recall::Hit(result) => {
                trace!(memo = self.id.raw(), offset = input.offset(), kind = %result.kind(), "memo hit");
                result
            }
            Recall::LeftRecursion { bypassed } => {
                trace!(memo = self.id.raw(), offset = input.offset(), bypassed, "left recursion detected");
                ParseResult::failure(LEFT_RECURSION_MESSAGE, input.clone())
            }
            Recall::Bypassed => {
                trace!(memo = self.id.raw(), offset = input.offset(), "bypassed entry re-run");
                self.run(input, cx)
            }
        }
    }
}

impl<P> Memo<P> {
    fn run<T>(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, P::Output>
    where
        P: Parser<T>,
    {
        ensure_sufficient_stack(|| self.parser.parse(input, cx))
    }

    /// First visit of this rule at `input`.
    fn evaluate<T>(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, P::Output>
    where
        T: Eq + 'static,
        P: Parser<T>,
        P::Output: Clone + 'static,
    {
        trace!(memo = self.id.raw(), offset = input.offset(), remaining = input.len(), "memo evaluate");
        cx.memo_mut().begin(self.id, input);
        let result = self.run(input, cx);
        match cx.memo_mut().finish(self.id, input) {
            EntryState::Bypassed => result,
            EntryState::LeftRecursive if result.is_success() => self.grow(input, cx, result),
            EntryState::Evaluating | EntryState::LeftRecursive => {
                cx.memo_mut().store(self.id, input, result.clone());
                result
            }
        }
    }

    /// Re-run a left-recursive rule on top of its cached seed until a round
    /// stops consuming more input.
    fn grow<T>(
        &self,
        input: &Sequence<T>,
        cx: &mut ParseContext<T>,
        seed: ParseResult<T, P::Output>,
    ) -> ParseResult<T, P::Output>
    where
        T: Eq + 'static,
        P: Parser<T>,
        P::Output: Clone + 'static,
    {
        let mut best = seed;
        loop {
            cx.memo_mut().store(self.id, input, best.clone());
            cx.memo_mut().record_growth_step();
            let next = self.run(input, cx);
            if next.is_error() && !cx.flags().has(ContextFlags::KEEP_SEED_ON_ERROR) {
                trace!(memo = self.id.raw(), offset = input.offset(), "seed growth hit an error");
                cx.memo_mut().store(self.id, input, next.clone());
                return next;
            }
            if next.is_success() && next.rest().len() < best.rest().len() {
                trace!(memo = self.id.raw(), offset = input.offset(), remaining = next.rest().len(), "seed grown");
                best = next;
                continue;
            }
            trace!(memo = self.id.raw(), offset = input.offset(), remaining = best.rest().len(), "seed settled");
            cx.memo_mut().store(self.id, input, best.clone());
            return best;
        }
    }
}

#[cfg(test)]
mod tests;
