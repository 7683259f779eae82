//! String form of character inputs for regular-expression leaves.
//!
//! A regex needs a `&str`, but input arrives as a `Sequence<char>`. Each
//! backing `[char]` is converted once per thread, together with a table from
//! char index to byte offset, so any view of it maps to a `&str` slice in
//! O(1).

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Weak};

use sprout_parse::Sequence;
use tracing::trace;

/// Backing inputs whose string form is kept per thread.
const CACHED_SOURCES: usize = 8;

/// UTF-8 copy of one backing `[char]`.
struct SourceText {
    chars: Weak<[char]>,
    text: String,
    /// Byte offset of each char, followed by `text.len()`.
    offsets: Box<[usize]>,
}

impl SourceText {
    fn build(chars: &Arc<[char]>) -> Self {
        let mut text = String::with_capacity(chars.len());
        let mut offsets = Vec::with_capacity(chars.len() + 1);
        for &c in chars.iter() {
            offsets.push(text.len());
            text.push(c);
        }
        offsets.push(text.len());
        trace!(chars = chars.len(), bytes = text.len(), "indexed source text");
        SourceText {
            chars: Arc::downgrade(chars),
            text,
            offsets: offsets.into_boxed_slice(),
        }
    }

    /// The weak reference keeps the allocation reserved, so an address match
    /// with a live `Arc` always means the same backing input.
    fn backs(&self, chars: &Arc<[char]>) -> bool {
        std::ptr::eq(self.chars.as_ptr(), Arc::as_ptr(chars))
    }

    fn is_live(&self) -> bool {
        self.chars.strong_count() > 0
    }
}

thread_local! {
    static SOURCES: RefCell<Vec<Rc<SourceText>>> = const { RefCell::new(Vec::new()) };
}

fn source_text(chars: &Arc<[char]>) -> Rc<SourceText> {
    SOURCES.with(|sources| {
        let mut sources = sources.borrow_mut();
        sources.retain(|source| source.is_live());
        if let Some(found) = sources.iter().find(|source| source.backs(chars)) {
            return Rc::clone(found);
        }
        if sources.len() >= CACHED_SOURCES {
            sources.remove(0);
        }
        let built = Rc::new(SourceText::build(chars));
        sources.push(Rc::clone(&built));
        built
    })
}

/// Call `f` with the remaining characters of `input` as a string slice.
pub(crate) fn with_remaining<R>(input: &Sequence<char>, f: impl FnOnce(&str) -> R) -> R {
    let source = source_text(input.source());
    let start = source.offsets[input.offset()];
    let end = source.offsets[input.offset() + input.len()];
    f(&source.text[start..end])
}

#[cfg(test)]
pub(crate) fn cached_sources() -> usize {
    SOURCES.with(|sources| sources.borrow().len())
}
