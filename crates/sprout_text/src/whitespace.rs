//! What a text leaf skips before it tries to match.

use regex::Regex;
use sprout_parse::Sequence;

use crate::error::{compile_anchored, TextError};
use crate::source::with_remaining;

/// Leading-input policy shared by [`literal_with`](crate::literal_with) and
/// [`pattern_with`](crate::pattern_with).
#[derive(Clone, Debug, Default)]
pub enum Whitespace {
    /// Skip any run of Unicode whitespace.
    #[default]
    Default,
    /// Skip nothing.
    None,
    /// Skip the longest prefix matched by a regular expression.
    Pattern(Regex),
}

impl Whitespace {
    /// Skip whatever `pattern` matches at the current position.
    pub fn pattern(pattern: &str) -> Result<Self, TextError> {
        compile_anchored(pattern).map(Whitespace::Pattern)
    }

    /// The view of `input` after the skipped prefix.
    pub fn skip(&self, input: &Sequence<char>) -> Sequence<char> {
        match self {
            Whitespace::Default => {
                let count = input.iter().take_while(|c| c.is_whitespace()).count();
                input.advance(count)
            }
            Whitespace::None => input.clone(),
            Whitespace::Pattern(regex) => {
                let count = with_remaining(input, |remaining| {
                    regex
                        .find(remaining)
                        .map_or(0, |found| remaining[..found.end()].chars().count())
                });
                input.advance(count)
            }
        }
    }
}
