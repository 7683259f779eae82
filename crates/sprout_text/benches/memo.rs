#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Memoization benchmarks.
//!
//! Compares a plain right-recursive rule, the same rule memoized, and a
//! memoized left-recursive rule over runs of `'1'`. A pattern token run
//! checks that regex leaves stay linear in the input size.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sprout_parse::{recursive, ParseContext, Parser, ParserExt, Recursive};
use sprout_text::{chars, literal, pattern};

const SIZES: [usize; 3] = [100, 1_000, 10_000];

/// `R := '1' R | '1'`
fn right_recursive() -> Recursive<char, usize> {
    recursive(|rest: Recursive<char, usize>| {
        literal("1")
            .then_right(rest)
            .map(|count| count + 1)
            .or(literal("1").map(|_| 1))
    })
}

/// `R := '1' R | '1'`, memoized
fn right_recursive_memo() -> Recursive<char, usize> {
    recursive(|rest: Recursive<char, usize>| {
        literal("1")
            .then_right(rest)
            .map(|count| count + 1)
            .or(literal("1").map(|_| 1))
            .memo()
    })
}

/// `L := L '1' | '1'`, memoized
fn left_recursive_memo() -> Recursive<char, usize> {
    recursive(|ones: Recursive<char, usize>| {
        ones.then_left(literal("1"))
            .map(|count| count + 1)
            .or(literal("1").map(|_| 1))
            .memo()
    })
}

fn bench_rule(c: &mut Criterion, name: &str, rule: &Recursive<char, usize>) {
    let mut group = c.benchmark_group(format!("memo/{name}"));
    for size in SIZES {
        let input = chars(&"1".repeat(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| {
                let mut cx = ParseContext::new();
                let outcome = rule.phrase().parse(input, &mut cx);
                assert_eq!(outcome.into_value(), size);
                black_box(cx.entry_count())
            });
        });
    }
    group.finish();
}

fn bench_right_recursive(c: &mut Criterion) {
    bench_rule(c, "right_recursive", &right_recursive());
}

fn bench_right_recursive_memo(c: &mut Criterion) {
    bench_rule(c, "right_recursive_memo", &right_recursive_memo());
}

fn bench_left_recursive_memo(c: &mut Criterion) {
    bench_rule(c, "left_recursive_memo", &left_recursive_memo());
}

fn bench_pattern_tokens(c: &mut Criterion) {
    let words = pattern("[a-z]+").expect("valid pattern").rep().phrase();
    let mut group = c.benchmark_group("memo/pattern_tokens");
    for size in SIZES {
        let input = chars(&" word".repeat(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| {
                let mut cx = ParseContext::new();
                let outcome = words.parse(input, &mut cx);
                black_box(outcome.into_value().len())
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_right_recursive,
    bench_right_recursive_memo,
    bench_left_recursive_memo,
    bench_pattern_tokens,
);
criterion_main!(benches);
