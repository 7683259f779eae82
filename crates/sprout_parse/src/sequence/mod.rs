//! Immutable input views.
//!
//! A [`Sequence`] is a window `start..end` over a shared backing collection.
//! Consuming input never mutates anything: combinators hand their successors
//! a new view produced by [`Sequence::advance`], which is O(1) and shares the
//! backing allocation.
//!
//! # Equality
//!
//! Two views are equal when they cover the same window of equal backing
//! content. Views over the same allocation compare in O(1); views over
//! separately allocated but equal content fall back to comparing the content.
//! `Hash` covers only the window bounds, which keeps memo-table lookups O(1)
//! and stays consistent with `Eq`.

use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::SequenceError;

/// A position in an immutable, randomly indexable input.
pub struct Sequence<T> {
    source: Arc<[T]>,
    start: usize,
    end: usize,
}

impl<T> Sequence<T> {
    /// Create a view covering the whole collection.
    pub fn new(items: impl Into<Arc<[T]>>) -> Self {
        let source = items.into();
        let end = source.len();
        Sequence {
            source,
            start: 0,
            end,
        }
    }

    /// Number of elements remaining from this position.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if no elements remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Absolute index of this position in the backing collection.
    #[inline]
    pub fn offset(&self) -> usize {
        self.start
    }

    /// Element at `index`, relative to this position.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    #[track_caller]
    pub fn at(&self, index: usize) -> &T {
        match self.try_at(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }

    /// Checked form of [`at`](Self::at).
    pub fn try_at(&self, index: usize) -> Result<&T, SequenceError> {
        self.get(index).ok_or(SequenceError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Element at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// The next element, if any.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// The view that remains after skipping `count` elements.
    ///
    /// `advance(0)` shares the window with `self`.
    ///
    /// # Panics
    ///
    /// Panics if `count > self.len()`.
    #[inline]
    #[track_caller]
    pub fn advance(&self, count: usize) -> Sequence<T> {
        match self.try_advance(count) {
            Ok(rest) => rest,
            Err(err) => panic!("{err}"),
        }
    }

    /// Checked form of [`advance`](Self::advance).
    pub fn try_advance(&self, count: usize) -> Result<Sequence<T>, SequenceError> {
        self.try_slice(count, self.len())
    }

    /// The sub-view `start..end`, relative to this position.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > self.len()`.
    #[inline]
    #[track_caller]
    pub fn slice(&self, start: usize, end: usize) -> Sequence<T> {
        match self.try_slice(start, end) {
            Ok(view) => view,
            Err(err) => panic!("{err}"),
        }
    }

    /// Checked form of [`slice`](Self::slice).
    pub fn try_slice(&self, start: usize, end: usize) -> Result<Sequence<T>, SequenceError> {
        if start > end || end > self.len() {
            return Err(SequenceError::RangeOutOfBounds {
                start,
                end,
                len: self.len(),
            });
        }
        Ok(Sequence {
            source: Arc::clone(&self.source),
            start: self.start + start,
            end: self.start + end,
        })
    }

    /// The remaining elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.source[self.start..self.end]
    }

    /// Iterate over the remaining elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// The whole backing collection, including elements outside this view.
    #[inline]
    pub fn source(&self) -> &Arc<[T]> {
        &self.source
    }

    /// Returns `true` if both views share one backing allocation.
    #[inline]
    pub fn same_source(&self, other: &Sequence<T>) -> bool {
        Arc::ptr_eq(&self.source, &other.source)
    }
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Sequence {
            source: Arc::clone(&self.source),
            start: self.start,
            end: self.end,
        }
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && (self.same_source(other) || self.source == other.source)
    }
}

impl<T: Eq> Eq for Sequence<T> {}

impl<T> Hash for Sequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Sequence::new(items)
    }
}

impl<T: Clone> From<&[T]> for Sequence<T> {
    fn from(items: &[T]) -> Self {
        Sequence::new(items)
    }
}

impl From<&str> for Sequence<char> {
    fn from(text: &str) -> Self {
        Sequence::new(text.chars().collect::<Vec<_>>())
    }
}

impl From<String> for Sequence<char> {
    fn from(text: String) -> Self {
        Sequence::from(text.as_str())
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("offset", &self.start)
            .field("remaining", &self.as_slice())
            .finish()
    }
}

impl fmt::Display for Sequence<char> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self {
            f.write_char(*c)?;
        }
        Ok(())
    }
}
