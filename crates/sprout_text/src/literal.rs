use sprout_parse::{ParseContext, ParseResult, Parser, Sequence};

use crate::whitespace::Whitespace;

/// Match `literal` after skipping default whitespace.
pub fn literal(literal: impl Into<String>) -> Literal {
    literal_with(literal, Whitespace::Default)
}

/// Match `literal` after skipping per `whitespace`.
pub fn literal_with(literal: impl Into<String>, whitespace: Whitespace) -> Literal {
    let literal = literal.into();
    Literal {
        chars: literal.chars().collect(),
        literal,
        whitespace,
    }
}

/// Parser for a fixed string. Produces the string itself.
#[derive(Clone, Debug)]
pub struct Literal {
    literal: String,
    chars: Vec<char>,
    whitespace: Whitespace,
}

impl Literal {
    pub fn as_str(&self) -> &str {
        &self.literal
    }
}

impl Parser<char> for Literal {
    type Output = String;

    fn parse(&self, input: &Sequence<char>, _cx: &mut ParseContext<char>) -> ParseResult<char, String> {
        let start = self.whitespace.skip(input);
        if start.as_slice().starts_with(&self.chars) {
            ParseResult::success(self.literal.clone(), start.advance(self.chars.len()))
        } else {
            ParseResult::failure(format!("'{}' expected", self.literal), start)
        }
    }
}
