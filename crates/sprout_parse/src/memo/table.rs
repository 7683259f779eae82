//! Per-context memo storage.
//!
//! Entries are grouped by input position. Each position holds the entries of
//! every memoized rule evaluated there, plus the stack of rules whose
//! evaluation at that position has started but not finished. Left recursion
//! is exactly a rule appearing twice on one position's stack, so the stack
//! never needs to look at other positions.

use std::any::Any;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::MemoId;
use crate::outcome::ParseResult;
use crate::sequence::Sequence;

/// Engine state of one (rule, position) entry.
///
/// A rule with no entry at a position has not been visited there yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryState {
    /// Created on first visit. In progress while the rule is on the
    /// position's active stack, settled once it holds a result.
    Evaluating,
    /// Re-entered at the same position before producing a result. The first
    /// success becomes a seed that is grown until it stops consuming more.
    LeftRecursive,
    /// Sits inside a cycle owned by an outer rule. Never cached; every visit
    /// re-runs the rule.
    Bypassed,
}

/// Counters collected while parsing with one context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// Fresh evaluations of a memoized rule.
    pub evaluations: usize,
    /// Visits answered from the cache.
    pub hits: usize,
    /// Re-entries that returned the synthetic left-recursion failure.
    pub left_recursions: usize,
    /// Re-runs of a left-recursive rule while growing its seed.
    pub growth_steps: usize,
    /// Visits to bypassed entries, each of which re-ran the rule.
    pub bypassed: usize,
}

/// Answer to a visit of a (rule, position) pair.
pub(crate) enum Recall<T, U> {
    /// No entry yet.
    Fresh,
    /// Cached outcome.
    Hit(ParseResult<T, U>),
    /// The rule is already running at this position. Carries the number of
    /// entries newly marked bypassed.
    LeftRecursion { bypassed: usize },
    /// Re-run the rule without touching the cache.
    Bypassed,
}

struct RuleEntry {
    state: EntryState,
    result: Option<Box<dyn Any>>,
}

#[derive(Default)]
struct PositionEntry {
    rules: FxHashMap<MemoId, RuleEntry>,
    active: SmallVec<[MemoId; 4]>,
}

pub(crate) struct MemoTable<T> {
    positions: FxHashMap<Sequence<T>, PositionEntry>,
    stats: MemoStats,
}

impl<T> Default for MemoTable<T> {
    fn default() -> Self {
        MemoTable {
            positions: FxHashMap::default(),
            stats: MemoStats::default(),
        }
    }
}

impl<T: Eq + 'static> MemoTable<T> {
    /// Look up `id` at `input`.
    ///
    /// A visit that finds the rule in progress marks the entries above it on
    /// the position's stack as bypassed and the rule itself as left
    /// recursive.
    pub(crate) fn recall<U: Clone + 'static>(
        &mut self,
        id: MemoId,
        input: &Sequence<T>,
    ) -> Recall<T, U> {
        let Some(position) = self.positions.get_mut(input) else {
            return Recall::Fresh;
        };
        let Some(rule) = position.rules.get(&id) else {
            return Recall::Fresh;
        };
        if rule.state == EntryState::Bypassed {
            self.stats.bypassed += 1;
            return Recall::Bypassed;
        }
        if let Some(cached) = &rule.result {
            let Some(result) = cached.downcast_ref::<ParseResult<T, U>>() else {
                unreachable!("memo entry {id:?} holds a result of another type");
            };
            self.stats.hits += 1;
            return Recall::Hit(result.clone());
        }

        let mut bypassed = 0;
        if let Some(index) = position.active.iter().rposition(|&active| active == id) {
            for above in &position.active[index + 1..] {
                if let Some(entry) = position.rules.get_mut(above) {
                    if entry.state != EntryState::Bypassed {
                        entry.state = EntryState::Bypassed;
                        bypassed += 1;
                    }
                }
            }
        }
        if let Some(rule) = position.rules.get_mut(&id) {
            rule.state = EntryState::LeftRecursive;
        }
        self.stats.left_recursions += 1;
        Recall::LeftRecursion { bypassed }
    }

    /// Create the entry for `id` at `input` and push it on that position's
    /// active stack.
    pub(crate) fn begin(&mut self, id: MemoId, input: &Sequence<T>) {
        let position = self.positions.entry(input.clone()).or_default();
        position.rules.insert(
            id,
            RuleEntry {
                state: EntryState::Evaluating,
                result: None,
            },
        );
        position.active.push(id);
        self.stats.evaluations += 1;
    }

    /// Pop `id` off the active stack of `input` and report the state its
    /// entry ended up in.
    pub(crate) fn finish(&mut self, id: MemoId, input: &Sequence<T>) -> EntryState {
        let Some(position) = self.positions.get_mut(input) else {
            unreachable!("memo entry {id:?} finished at a position it never began");
        };
        let popped = position.active.pop();
        debug_assert_eq!(popped, Some(id), "memo evaluations must nest");
        position
            .rules
            .get(&id)
            .map_or(EntryState::Evaluating, |rule| rule.state)
    }

    /// Cache `result` for `id` at `input`.
    pub(crate) fn store<U: Clone + 'static>(
        &mut self,
        id: MemoId,
        input: &Sequence<T>,
        result: ParseResult<T, U>,
    ) {
        if let Some(rule) = self
            .positions
            .get_mut(input)
            .and_then(|position| position.rules.get_mut(&id))
        {
            rule.result = Some(Box::new(result));
        }
    }

    pub(crate) fn record_growth_step(&mut self) {
        self.stats.growth_steps += 1;
    }

    pub(crate) fn state(&self, id: MemoId, input: &Sequence<T>) -> Option<EntryState> {
        self.positions
            .get(input)
            .and_then(|position| position.rules.get(&id))
            .map(|rule| rule.state)
    }

    pub(crate) fn is_cached(&self, id: MemoId, input: &Sequence<T>) -> bool {
        self.positions
            .get(input)
            .and_then(|position| position.rules.get(&id))
            .is_some_and(|rule| rule.result.is_some())
    }

    /// Number of (rule, position) entries.
    pub(crate) fn len(&self) -> usize {
        self.positions
            .values()
            .map(|position| position.rules.len())
            .sum()
    }

    pub(crate) fn stats(&self) -> MemoStats {
        self.stats
    }

    pub(crate) fn clear(&mut self) {
        self.positions.clear();
        self.stats = MemoStats::default();
    }
}
