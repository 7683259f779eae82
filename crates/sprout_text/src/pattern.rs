use regex::Regex;
use sprout_parse::{ParseContext, ParseResult, Parser, Sequence};
use tracing::trace;

use crate::error::{compile_anchored, TextError};
use crate::source::with_remaining;
use crate::whitespace::Whitespace;

/// Match the regular expression `pattern` after skipping default whitespace.
pub fn pattern(pattern: &str) -> Result<Pattern, TextError> {
    pattern_with(pattern, Whitespace::Default)
}

/// Match the regular expression `pattern` after skipping per `whitespace`.
///
/// The expression only matches at the position after the skipped prefix.
pub fn pattern_with(pattern: &str, whitespace: Whitespace) -> Result<Pattern, TextError> {
    let regex = compile_anchored(pattern)?;
    trace!(pattern, "compiled text pattern");
    Ok(Pattern {
        source: pattern.to_string(),
        regex,
        whitespace,
    })
}

/// Parser for a regular expression. Produces the matched text.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    regex: Regex,
    whitespace: Whitespace,
}

impl Pattern {
    /// The expression as written by the caller.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Parser<char> for Pattern {
    type Output = String;

    fn parse(&self, input: &Sequence<char>, _cx: &mut ParseContext<char>) -> ParseResult<char, String> {
        let start = self.whitespace.skip(input);
        let matched = with_remaining(&start, |remaining| {
            self.regex
                .find(remaining)
                .map(|found| remaining[..found.end()].to_string())
        });
        match matched {
            Some(matched) => {
                let count = matched.chars().count();
                ParseResult::success(matched, start.advance(count))
            }
            None => ParseResult::failure(format!("'{}' expected", self.source), start),
        }
    }
}
