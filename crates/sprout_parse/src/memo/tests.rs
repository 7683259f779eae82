use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::*;
use crate::combinator::{elem, raise, satisfy, Satisfy};
use crate::parser::{from_fn, ParserExt};
use crate::recursive::{recursive, Recursive};
use pretty_assertions::assert_eq;

#[derive(Clone, Debug, PartialEq)]
enum Expr {
    Num(char),
    Add(Box<Expr>, Box<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(digit) => write!(f, "{digit}"),
            Expr::Add(left, right) => write!(f, "({left}+{right})"),
        }
    }
}

fn digit() -> Satisfy<impl Fn(&char) -> bool + Clone + Send + Sync> {
    satisfy("digit", |c: &char| c.is_ascii_digit())
}

fn add(left: Expr, right: char) -> Expr {
    Expr::Add(Box::new(left), Box::new(Expr::Num(right)))
}

/// `E := E '+' digit | digit`
fn sum() -> Recursive<char, Expr> {
    recursive(|expr: Recursive<char, Expr>| {
        expr.then_left(elem('+'))
            .then(digit())
            .map(|(left, right)| add(left, right))
            .or(digit().map(Expr::Num))
            .memo()
    })
}

#[test]
fn test_ids_are_unique_and_shared_by_clones() {
    let a = elem('a').memo();
    let b = elem('a').memo();
    assert_ne!(a.id(), b.id());
    assert_eq!(a.clone().id(), a.id());
    assert_ne!(a.id().raw(), b.id().raw());
}

#[test]
fn test_ids_increase_in_a_64_bit_space() {
    let first: u64 = elem('a').memo().id().raw();
    let second: u64 = elem('a').memo().id().raw();
    assert!(second > first);
}

#[test]
fn test_evaluates_once_per_position() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = {
        let calls = Arc::clone(&calls);
        from_fn(move |input: &Sequence<char>, cx: &mut ParseContext<char>| {
            calls.fetch_add(1, Ordering::Relaxed);
            elem('a').parse(input, cx)
        })
    };
    let rule = counted.memo();
    let input = Sequence::from("ab");
    let mut cx = ParseContext::new();

    let first = rule.parse(&input, &mut cx);
    let second = rule.parse(&input, &mut cx);
    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    let elsewhere = rule.parse(&input.advance(1), &mut cx);
    assert!(elsewhere.is_failure());
    let _ = rule.parse(&input.advance(1), &mut cx);
    assert_eq!(calls.load(Ordering::Relaxed), 2);

    let stats = cx.stats();
    assert_eq!(stats.evaluations, 2);
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.left_recursions, 0);
}

#[test]
fn test_separately_built_views_hit_the_same_entry() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = {
        let calls = Arc::clone(&calls);
        from_fn(move |input: &Sequence<char>, cx: &mut ParseContext<char>| {
            calls.fetch_add(1, Ordering::Relaxed);
            elem('b').parse(input, cx)
        })
    };
    let rule = counted.memo();
    let mut cx = ParseContext::new();

    let a = Sequence::from("abc").advance(1);
    let b = Sequence::from(String::from("abc")).advance(1);
    assert!(!a.same_source(&b));

    let first = rule.parse(&a, &mut cx);
    let second = rule.parse(&b, &mut cx);
    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(cx.stats().hits, 1);
}

#[test]
fn test_contexts_are_isolated() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = {
        let calls = Arc::clone(&calls);
        from_fn(move |input: &Sequence<char>, cx: &mut ParseContext<char>| {
            calls.fetch_add(1, Ordering::Relaxed);
            elem('a').parse(input, cx)
        })
    };
    let rule = counted.memo();
    let input = Sequence::from("a");

    let _ = rule.parse(&input, &mut ParseContext::new());
    let _ = rule.parse(&input, &mut ParseContext::new());
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn test_non_success_is_cached_verbatim() {
    let rule = ParserExt::<char>::memo(raise::<char>("broken"));
    let input = Sequence::from("x");
    let mut cx = ParseContext::new();

    let first = rule.parse(&input, &mut cx);
    assert_eq!(first, ParseResult::error("broken", input.clone()));
    assert!(cx.is_cached(rule.id(), &input));
    assert_eq!(rule.parse(&input, &mut cx), first);
    assert_eq!(cx.stats().hits, 1);
}

#[test]
fn test_direct_left_recursion_nests_left() {
    let expr = sum().phrase();
    let outcome = expr.run("1+2+3");
    assert!(outcome.is_success());
    assert!(outcome.rest().is_empty());
    assert_eq!(outcome.value().to_string(), "((1+2)+3)");
}

#[test]
fn test_seed_growth_statistics() {
    let expr = sum();
    let input = Sequence::from("1+2+3");
    let mut cx = ParseContext::new();

    assert!(expr.parse(&input, &mut cx).is_success());
    let stats = cx.stats();
    assert_eq!(stats.left_recursions, 1);
    assert_eq!(stats.growth_steps, 3);
    assert_eq!(stats.evaluations, 1);
}

#[test]
fn test_single_element_needs_no_growth() {
    let outcome = sum().run("7");
    assert_eq!(outcome, ParseResult::success(Expr::Num('7'), Sequence::from("7").advance(1)));
}

#[test]
fn test_growth_stops_at_trailing_garbage() {
    let input = Sequence::from("1+2+");
    let outcome = sum().run(input.clone());
    assert_eq!(outcome.value().to_string(), "(1+2)");
    assert_eq!(outcome.rest(), &input.advance(3));
}

#[test]
fn test_pure_left_recursion_fails() {
    let rule = recursive(|rule: Recursive<char, char>| rule.memo());
    let input = Sequence::from("dummy");
    let outcome = rule.run(input.clone());
    assert_eq!(outcome, ParseResult::failure(LEFT_RECURSION_MESSAGE, input));
}

#[test]
fn test_left_recursion_failure_lets_alternation_continue() {
    // E := E | 'x'
    let rule = recursive(|rule: Recursive<char, char>| rule.or(elem('x')).memo());
    let input = Sequence::from("x");
    assert_eq!(rule.run(input.clone()), ParseResult::success('x', input.advance(1)));
}

#[test]
fn test_cycle_members_are_bypassed() {
    // X := Y | 'a'
    // Y := X 'b'
    let x_rule: Recursive<char, String> = Recursive::declare();
    let y = x_rule
        .handle()
        .then(elem('b'))
        .map(|(x, b)| format!("{x}{b}"))
        .memo();
    let x = y.clone().or(elem('a').map(String::from)).memo();
    let (x_id, y_id) = (x.id(), y.id());
    x_rule.define(x);

    let input = Sequence::from("abb");
    let mut cx = ParseContext::new();
    let outcome = x_rule.parse(&input, &mut cx);
    assert_eq!(outcome, ParseResult::success("abb".to_string(), input.advance(3)));

    assert_eq!(cx.entry_state(x_id, &input), Some(EntryState::LeftRecursive));
    assert_eq!(cx.entry_state(y_id, &input), Some(EntryState::Bypassed));
    assert!(cx.is_cached(x_id, &input));
    assert!(!cx.is_cached(y_id, &input));

    let stats = cx.stats();
    assert_eq!(stats.left_recursions, 1);
    assert_eq!(stats.growth_steps, 3);
    assert_eq!(stats.bypassed, 3);
}

/// `E := E '+' (digit | error) | digit`
fn committed_sum() -> Recursive<char, Expr> {
    recursive(|expr: Recursive<char, Expr>| {
        let operand = digit().or(raise("digit expected after '+'"));
        expr.then_left(elem('+'))
            .then(operand)
            .map(|(left, right)| add(left, right))
            .or(digit().map(Expr::Num))
            .memo()
    })
}

#[test]
fn test_error_during_growth_propagates() {
    let input = Sequence::from("1+2+x");
    let rule = committed_sum();
    let mut cx = ParseContext::new();

    let outcome = rule.parse(&input, &mut cx);
    assert_eq!(
        outcome,
        ParseResult::error("digit expected after '+'", input.advance(4))
    );
    assert_eq!(rule.parse(&input, &mut cx), outcome);
}

#[test]
fn test_error_during_growth_can_keep_seed() {
    let input = Sequence::from("1+2+x");
    let rule = committed_sum();
    let mut cx = ParseContext::with_flags(ContextFlags::KEEP_SEED_ON_ERROR);

    let outcome = rule.parse(&input, &mut cx);
    assert_eq!(outcome.value().to_string(), "(1+2)");
    assert_eq!(outcome.rest(), &input.advance(3));

    let again = rule.parse(&input, &mut cx);
    assert_eq!(again, outcome);
}

#[test]
fn test_long_left_recursive_chain() {
    let ones = recursive(|ones: Recursive<char, usize>| {
        ones.then_left(elem('1'))
            .map(|count| count + 1)
            .or(elem('1').map(|_| 1))
            .memo()
    });
    let input = "1".repeat(2_000);
    assert_eq!(ones.phrase().run(input.as_str()).into_value(), 2_000);
}
