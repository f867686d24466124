//! Benchmarks for unification, indexed queries and forward chaining
//!
//! The query benchmarks compare a pattern with a symbol head (one bucket
//! scanned) against a variable pattern (every bucket scanned) over the same
//! space, so the effect of the head-symbol index is visible directly.

use atomspace::backend::{unify, AtomSpace, Interpreter};
use atomspace::{expr, sym, var, Atom};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

/// `(rel_k item_i value_i)` for `relations` heads of `per_relation` atoms each
fn populated_space(relations: usize, per_relation: usize) -> AtomSpace {
    let space = AtomSpace::new();
    for r in 0..relations {
        for i in 0..per_relation {
            space.add(expr([
                sym(format!("rel_{}", r)),
                sym(format!("item_{}", i)),
                sym(format!("value_{}", i)),
            ]));
        }
    }
    space
}

/// Right-nested list `(cons x0 (cons x1 ... nil))` of the given depth
fn nested(depth: usize, leaf: impl Fn(usize) -> Atom) -> Atom {
    (0..depth)
        .rev()
        .fold(sym("nil"), |tail, i| expr([sym("cons"), leaf(i), tail]))
}

fn bench_unify_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("unify_depth");

    for &depth in &[1, 10, 50, 100] {
        let pattern = nested(depth, |i| var(format!("v{}", i)));
        let value = nested(depth, |i| sym(format!("s{}", i)));

        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| black_box(unify(black_box(&pattern), black_box(&value))))
        });
    }

    group.finish();
}

fn bench_unify_shared_variable(c: &mut Criterion) {
    // ($x $x ... $x) against (a a ... a): every child after the first checks a binding
    let pattern = expr((0..32).map(|_| var("x")));
    let value = expr((0..32).map(|_| sym("a")));

    c.bench_function("unify_shared_variable_32", |b| {
        b.iter(|| black_box(unify(black_box(&pattern), black_box(&value))))
    });
}

fn bench_query_indexed_vs_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    for &relations in &[1, 10, 100] {
        let space = populated_space(relations, 100);
        let by_head = expr([sym("rel_0"), var("x"), var("y")]);
        let by_variable = expr([var("r"), sym("item_5"), var("y")]);

        group.bench_with_input(
            BenchmarkId::new("indexed_head", relations),
            &relations,
            |b, _| b.iter(|| black_box(space.query(black_box(&by_head)).count())),
        );
        group.bench_with_input(
            BenchmarkId::new("variable_head", relations),
            &relations,
            |b, _| b.iter(|| black_box(space.query(black_box(&by_variable)).count())),
        );
    }

    group.finish();
}

fn bench_forward_chaining(c: &mut Criterion) {
    let space = Arc::new(AtomSpace::new());
    for i in 0..200 {
        space.add(expr([sym("Human"), sym(format!("person_{}", i))]));
    }
    space.add(expr([
        sym("implies"),
        expr([sym("Human"), var("x")]),
        expr([sym("Mortal"), var("x")]),
    ]));
    let interpreter = Interpreter::new(space);

    let ground = expr([sym("Mortal"), sym("person_150")]);
    let open = expr([sym("Mortal"), var("who")]);

    c.bench_function("forward_chain_ground", |b| {
        b.iter(|| black_box(interpreter.evaluate(black_box(&ground))))
    });
    c.bench_function("forward_chain_open_200", |b| {
        b.iter(|| black_box(interpreter.evaluate(black_box(&open))))
    });
}

criterion_group!(
    benches,
    bench_unify_depth,
    bench_unify_shared_variable,
    bench_query_indexed_vs_scan,
    bench_forward_chaining,
);
criterion_main!(benches);
