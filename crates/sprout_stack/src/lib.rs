//! Stack growth for combinator recursion.
//!
//! A combinator parse recurses once per nested rule application, and for a
//! right-recursive rule that means once per input element. Rule entry points
//! (memoized rules, recursive cells) run their body through
//! [`ensure_sufficient_stack`] so a long input cannot overflow the thread's
//! stack.
//!
//! Native targets grow the stack with `stacker`. On `wasm32` the guard is a
//! plain call.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment when less than the red
/// zone remains on the current one.
///
/// ```text
/// fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, U> {
///     ensure_sufficient_stack(|| self.body.parse(input, cx))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// `wasm32` manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Remaining stack space in bytes, when the platform can report it.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

/// `wasm32` cannot report its stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}
