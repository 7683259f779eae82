//! Per-run parse state.
//!
//! A [`ParseContext`] owns everything one parse run mutates: the memo table,
//! the trace depth and the statistics. Parsers themselves are immutable and
//! may be shared freely; contexts may not be shared between two parses that
//! are in flight at the same time.

use crate::memo::{EntryState, MemoId, MemoStats, MemoTable};
use crate::sequence::Sequence;

/// Behavior switches for a [`ParseContext`].
///
/// Multiple flags can be combined using `with` or `union`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContextFlags(u16);

impl ContextFlags {
    /// No special behavior.
    pub const NONE: Self = Self(0);

    /// An error produced while growing a left-recursive seed is dropped and
    /// the best seed so far is returned. Without it the error is cached and
    /// returned.
    pub const KEEP_SEED_ON_ERROR: Self = Self(1 << 0);

    /// Enables the output of [`trace`](crate::ParserExt::trace) wrappers.
    pub const TRACE: Self = Self(1 << 1);

    #[inline]
    pub const fn new() -> Self {
        Self::NONE
    }

    /// Check if a flag is set.
    #[inline]
    pub const fn has(self, flag: Self) -> bool {
        (self.0 & flag.0) != 0
    }

    /// Add a flag.
    #[inline]
    #[must_use]
    pub const fn with(self, flag: Self) -> Self {
        Self(self.0 | flag.0)
    }

    /// Remove a flag.
    #[inline]
    #[must_use]
    pub const fn without(self, flag: Self) -> Self {
        Self(self.0 & !flag.0)
    }

    /// Union of both flag sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn keeps_seed_on_error(self) -> bool {
        self.has(Self::KEEP_SEED_ON_ERROR)
    }

    #[inline]
    pub const fn traces(self) -> bool {
        self.has(Self::TRACE)
    }
}

/// State of one parse run over input of element type `T`.
pub struct ParseContext<T> {
    memo: MemoTable<T>,
    flags: ContextFlags,
    trace_depth: usize,
}

impl<T> ParseContext<T> {
    pub fn new() -> Self {
        Self::with_flags(ContextFlags::NONE)
    }

    pub fn with_flags(flags: ContextFlags) -> Self {
        ParseContext {
            memo: MemoTable::default(),
            flags,
            trace_depth: 0,
        }
    }

    #[inline]
    pub fn flags(&self) -> ContextFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: ContextFlags) {
        self.flags = flags;
    }

    pub(crate) fn memo_mut(&mut self) -> &mut MemoTable<T> {
        &mut self.memo
    }

    /// Nesting depth of traced rules currently running.
    #[inline]
    pub fn trace_depth(&self) -> usize {
        self.trace_depth
    }

    pub(crate) fn enter_trace(&mut self) -> usize {
        let depth = self.trace_depth;
        self.trace_depth += 1;
        depth
    }

    pub(crate) fn exit_trace(&mut self) {
        self.trace_depth = self.trace_depth.saturating_sub(1);
    }
}

impl<T: Eq + 'static> ParseContext<T> {
    /// Forget every memo entry and statistic so the context can drive an
    /// unrelated parse. Flags are kept.
    pub fn reset(&mut self) {
        self.memo.clear();
        self.trace_depth = 0;
    }

    /// Number of (rule, position) entries in the memo table.
    pub fn entry_count(&self) -> usize {
        self.memo.len()
    }

    /// State of the entry for rule `id` at `input`, or `None` if the rule
    /// was never evaluated there.
    pub fn entry_state(&self, id: MemoId, input: &Sequence<T>) -> Option<EntryState> {
        self.memo.state(id, input)
    }

    /// Whether rule `id` has a cached result at `input`.
    pub fn is_cached(&self, id: MemoId, input: &Sequence<T>) -> bool {
        self.memo.is_cached(id, input)
    }

    pub fn stats(&self) -> MemoStats {
        self.memo.stats()
    }
}

impl<T> Default for ParseContext<T> {
    fn default() -> Self {
        Self::new()
    }
}
