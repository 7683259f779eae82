#![allow(
    clippy::unwrap_used,
    reason = "test assertions use unwrap for clarity"
)]

use std::io;
use std::sync::{Arc, Mutex};

use super::*;
use crate::combinator::elem;
use crate::parser::ParserExt;
use pretty_assertions::assert_eq;
use tracing_subscriber::fmt::MakeWriter;

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = Capture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn traced_parse<P>(parser: &P, input: &str, flags: ContextFlags) -> (ParseResult<char, P::Output>, String)
where
    P: Parser<char>,
{
    let capture = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(capture.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        let mut cx = ParseContext::with_flags(flags);
        let result = parser.parse(&Sequence::from(input), &mut cx);
        assert_eq!(cx.trace_depth(), 0);
        result
    });
    (result, capture.contents())
}

#[test]
fn test_passthrough_without_flag() {
    let parser = elem('a').trace("a");
    let (result, log) = traced_parse(&parser, "a", ContextFlags::NONE);
    assert!(result.is_success());
    assert_eq!(log, "");
}

#[test]
fn test_logs_enter_and_exit() {
    let parser = elem('a').trace("letter");
    let (result, log) = traced_parse(&parser, "a", ContextFlags::TRACE);
    assert!(result.is_success());
    assert!(log.contains("enter"), "{log}");
    assert!(log.contains("rule=letter"), "{log}");
    assert!(log.contains("outcome=success"), "{log}");
}

#[test]
fn test_logs_failure_message() {
    let parser = elem('a').trace("letter");
    let (result, log) = traced_parse(&parser, "b", ContextFlags::TRACE);
    assert!(result.is_failure());
    assert!(log.contains("outcome=failure"), "{log}");
    assert!(log.contains("'a' expected"), "{log}");
}

#[test]
fn test_nested_rules_track_depth() {
    let inner = elem('b').trace("inner");
    let outer = elem('a').then(inner).trace("outer");
    let (result, log) = traced_parse(&outer, "ab", ContextFlags::TRACE);
    assert!(result.is_success());
    assert!(log.contains("depth=0"), "{log}");
    assert!(log.contains("depth=1"), "{log}");
}

#[test]
fn test_trace_without_subscriber_is_transparent() {
    let parser = elem('a').trace("a");
    let mut cx = ParseContext::with_flags(ContextFlags::TRACE);
    let input = Sequence::from("a");
    assert_eq!(parser.parse(&input, &mut cx), ParseResult::success('a', input.advance(1)));
    assert_eq!(parser.name(), "a");
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}
