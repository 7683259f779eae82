//! Late-bound rules for recursive grammars.
//!
//! A rule that refers to itself cannot be built as a plain value: its
//! definition would need to contain itself. [`Recursive`] is a cell that is
//! declared first, referenced from any number of places, and defined once.
//!
//! The declaring value owns the cell. References taken with
//! [`Recursive::handle`] are weak, so a rule whose definition mentions itself
//! does not keep itself alive.
//!
//! ```ignore
//! let list = recursive(|list: Recursive<char, usize>| {
//!     elem('x').then_right(list).map(|n| n + 1).or(succeed(0))
//! });
//! assert_eq!(list.run("xxx").into_value(), 3);
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use sprout_stack::ensure_sufficient_stack;

use crate::context::ParseContext;
use crate::outcome::ParseResult;
use crate::parser::{BoxedParser, Parser};
use crate::sequence::Sequence;

type Cell<T, U> = OnceLock<BoxedParser<T, U>>;

enum Link<T, U> {
    Owned(Arc<Cell<T, U>>),
    Unowned(Weak<Cell<T, U>>),
}

/// A parser whose definition is supplied after it is referenced.
pub struct Recursive<T, U> {
    link: Link<T, U>,
}

impl<T, U> Recursive<T, U> {
    /// An owning, not yet defined rule.
    pub fn declare() -> Self {
        Recursive {
            link: Link::Owned(Arc::new(OnceLock::new())),
        }
    }

    /// A non-owning reference to the same rule.
    pub fn handle(&self) -> Self {
        let weak = match &self.link {
            Link::Owned(cell) => Arc::downgrade(cell),
            Link::Unowned(weak) => Weak::clone(weak),
        };
        Recursive {
            link: Link::Unowned(weak),
        }
    }

    /// Whether [`define`](Self::define) has been called.
    pub fn is_defined(&self) -> bool {
        match &self.link {
            Link::Owned(cell) => cell.get().is_some(),
            Link::Unowned(weak) => weak.upgrade().is_some_and(|cell| cell.get().is_some()),
        }
    }

    /// Supply the rule's definition.
    ///
    /// # Panics
    ///
    /// Panics if the rule is already defined, or if this is a handle whose
    /// owner has been dropped.
    #[track_caller]
    pub fn define<P>(&self, parser: P)
    where
        P: Parser<T, Output = U> + Send + Sync + 'static,
    {
        let cell = self.cell();
        if cell.set(BoxedParser::new(parser)).is_err() {
            panic!("recursive parser defined twice");
        }
    }

    #[track_caller]
    fn cell(&self) -> Arc<Cell<T, U>> {
        match &self.link {
            Link::Owned(cell) => Arc::clone(cell),
            Link::Unowned(weak) => match weak.upgrade() {
                Some(cell) => cell,
                None => panic!("recursive parser used after its owner was dropped"),
            },
        }
    }
}

/// Declare a rule, define it with `build(handle)` and return its owner.
///
/// The handle passed to `build` is non-owning; clone it to refer to the
/// rule more than once.
pub fn recursive<T, U, P, F>(build: F) -> Recursive<T, U>
where
    F: FnOnce(Recursive<T, U>) -> P,
    P: Parser<T, Output = U> + Send + Sync + 'static,
{
    let rule = Recursive::declare();
    rule.define(build(rule.handle()));
    rule
}

impl<T, U> Parser<T> for Recursive<T, U> {
    type Output = U;

    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, U> {
        let cell = self.cell();
        let Some(parser) = cell.get() else {
            panic!("recursive parser used before it was defined");
        };
        ensure_sufficient_stack(|| parser.parse(input, cx))
    }
}

impl<T, U> Clone for Recursive<T, U> {
    fn clone(&self) -> Self {
        let link = match &self.link {
            Link::Owned(cell) => Link::Owned(Arc::clone(cell)),
            Link::Unowned(weak) => Link::Unowned(Weak::clone(weak)),
        };
        Recursive { link }
    }
}

impl<T, U> fmt::Debug for Recursive<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let owned = matches!(self.link, Link::Owned(_));
        f.debug_struct("Recursive")
            .field("owned", &owned)
            .field("defined", &self.is_defined())
            .finish()
    }
}
