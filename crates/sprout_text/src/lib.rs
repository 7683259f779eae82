//! Character-level leaf parsers for `sprout_parse`.
//!
//! [`literal`] and [`pattern`] skip leading input according to a
//! [`Whitespace`] policy and then match a fixed string or a regular
//! expression. On failure their remainder is the position after the skipped
//! prefix. [`chars`] and [`text`] convert between strings and
//! `Sequence<char>`.

mod error;
mod literal;
mod pattern;
mod source;
mod whitespace;

pub use error::TextError;
pub use literal::{literal, literal_with, Literal};
pub use pattern::{pattern, pattern_with, Pattern};
pub use whitespace::Whitespace;

use sprout_parse::Sequence;

/// View `text` as a sequence of characters.
pub fn chars(text: &str) -> Sequence<char> {
    Sequence::from(text)
}

/// The remaining characters of `input` as a string.
pub fn text(input: &Sequence<char>) -> String {
    input.iter().collect()
}
