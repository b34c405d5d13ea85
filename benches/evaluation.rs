use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evalexpr::*;
use std::collections::HashMap;
use whisker_rs::{Evaluator, EvaluatorConfig, FunctionDef};

fn uncached() -> Evaluator {
    Evaluator::with_config(
        Vec::new(),
        HashMap::new(),
        EvaluatorConfig::new().cache_size(0),
    )
}

/// Benchmark simple arithmetic expressions
fn benchmark_simple_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simple arithmetic Expression Evaluation");

    let expr = "2 + 3 * 4";
    let cached = Evaluator::default();
    let uncached = uncached();
    let precompiled_evalexpr = build_operator_tree::<DefaultNumericTypes>(expr).unwrap();

    group.bench_function("uncached_arithmetic", |b| {
        b.iter(|| uncached.evaluate(black_box(expr)).unwrap())
    });

    group.bench_function("cached_arithmetic", |b| {
        b.iter(|| cached.evaluate(black_box(expr)).unwrap())
    });

    group.bench_function("native_rust_arithmetic", |b| {
        b.iter(|| black_box(2.0 + 3.0 * 4.0))
    });

    group.bench_function("meval_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });

    group.bench_function("evalexpr_arithmetic", |b| {
        b.iter(|| evalexpr::eval(black_box(expr)).unwrap())
    });

    group.bench_function("precompiled_evalexpr_arithmetic", |b| {
        b.iter(|| precompiled_evalexpr.eval().unwrap())
    });
}

/// Benchmark complex arithmetic expressions
fn benchmark_complex_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Complex arithmetic Expression Evaluation");

    let expr = "(10 + 20) * 3 / (4 - 1) + 5 ^ 2 ^ 0.5";
    let cached = Evaluator::default();
    let uncached = uncached();

    group.bench_function("uncached_complex_arithmetic", |b| {
        b.iter(|| uncached.evaluate(black_box(expr)).unwrap())
    });

    group.bench_function("cached_complex_arithmetic", |b| {
        b.iter(|| cached.evaluate(black_box(expr)).unwrap())
    });

    group.bench_function("meval_complex_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });
}

/// Benchmark built-in function calls
fn benchmark_builtin_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("Built-in Function Evaluation");

    let expr = "sqrt(16) + max(3, 7) * sin(0)";
    let evaluator = Evaluator::default();

    group.bench_function("builtin_calls", |b| {
        b.iter(|| evaluator.evaluate(black_box(expr)).unwrap())
    });

    group.bench_function("meval_builtin_calls", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });

    group.bench_function("native_rust_builtin_calls", |b| {
        b.iter(|| black_box(16f64.sqrt() + 7f64.max(3.0) * 0f64.sin()))
    });
}

/// Benchmark user-defined function calls
fn benchmark_user_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("User Function Evaluation");

    let evaluator = Evaluator::new(
        vec![
            FunctionDef::new("square", ["x"], "x * x"),
            FunctionDef::new(
                "zsormula",
                ["x1", "x2", "y1", "y2", "z1", "z2"],
                "((z1 ^ 2) + (z2^2)) * (x1 * y1 + x2 * y2)",
            ),
        ],
        HashMap::from([("half".to_string(), 0.5)]),
    );

    group.bench_function("single_call", |b| {
        b.iter(|| evaluator.evaluate(black_box("square(4)")).unwrap())
    });

    group.bench_function("nested_calls", |b| {
        b.iter(|| {
            evaluator
                .evaluate(black_box("square(square(half)) + zsormula(1,2,3,4,5,6)"))
                .unwrap()
        })
    });
}

/// Benchmark batch evaluation
fn benchmark_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Batch Evaluation");

    let evaluator = Evaluator::default();
    let owned: Vec<String> = (0..1000).map(|i| format!("{i} * 2 + sqrt({i})")).collect();
    let expressions: Vec<&str> = owned.iter().map(String::as_str).collect();

    group.bench_function("parallel_batch", |b| {
        b.iter(|| evaluator.evaluate_batch(black_box(&expressions)))
    });

    group.bench_function("sequential_batch", |b| {
        b.iter(|| {
            expressions
                .iter()
                .map(|e| evaluator.evaluate(*e))
                .collect::<Vec<_>>()
        })
    });
}

/// Grouping benchmarks
criterion_group!(
    benches,
    benchmark_simple_arithmetic,
    benchmark_complex_arithmetic,
    benchmark_builtin_calls,
    benchmark_user_functions,
    benchmark_batch,
);
criterion_main!(benches);
