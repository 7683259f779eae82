use thiserror::Error;

/// Errors raised while building text parsers.
#[derive(Debug, Error)]
pub enum TextError {
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Compile `pattern` so that it only matches at the start of the haystack.
pub(crate) fn compile_anchored(pattern: &str) -> Result<regex::Regex, TextError> {
    regex::Regex::new(&format!("^(?:{pattern})")).map_err(|source| TextError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
