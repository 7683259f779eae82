//! Rule-level tracing.
//!
//! [`Trace`] logs entry to and exit from a named rule at `DEBUG` level. It
//! is silent unless the context carries [`ContextFlags::TRACE`] and a
//! subscriber has `DEBUG` enabled for this crate, so traced grammars cost one
//! flag check when tracing is off.
//!
//! ```text
//! RUST_LOG=sprout_parse=debug cargo test
//! ```

use std::sync::Once;

use tracing::{debug, Level};

use crate::context::{ContextFlags, ParseContext};
use crate::outcome::ParseResult;
use crate::parser::Parser;
use crate::sequence::Sequence;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, when called a second time, or when
/// another global subscriber is already installed.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // A subscriber installed by the host application takes precedence.
            let _already_installed = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

/// A parser that logs its entry and exit under a rule name.
#[derive(Clone, Debug)]
pub struct Trace<P> {
    name: String,
    parser: P,
}

impl<P> Trace<P> {
    pub fn new(name: impl Into<String>, parser: P) -> Self {
        Trace {
            name: name.into(),
            parser,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T, P> Parser<T> for Trace<P>
where
    P: Parser<T>,
{
    type Output = P::Output;

    fn parse(&self, input: &Sequence<T>, cx: &mut ParseContext<T>) -> ParseResult<T, P::Output> {
        if !cx.flags().has(ContextFlags::TRACE) || !tracing::enabled!(Level::DEBUG) {
            return self.parser.parse(input, cx);
        }

        let depth = cx.enter_trace();
        debug!(
            rule = %self.name,
            depth,
            offset = input.offset(),
            remaining = input.len(),
            "enter"
        );
        let result = self.parser.parse(input, cx);
        cx.exit_trace();

        match &result {
            ParseResult::Success { rest, .. } => debug!(
                rule = %self.name,
                depth,
                outcome = %result.kind(),
                rest = rest.offset(),
                "exit"
            ),
            ParseResult::Failure { message, rest } | ParseResult::Error { message, rest } => {
                debug!(
                    rule = %self.name,
                    depth,
                    outcome = %result.kind(),
                    rest = rest.offset(),
                    message = %message,
                    "exit"
                );
            }
        }
        result
    }
}

#[cfg(test)]
mod tests;
