//! Benchmarks for the reasoning core
//!
//! This benchmark suite measures the performance of:
//! - Unification with offset arithmetic
//! - Binary resolution of rule/fact pairs
//! - Saturation over implication chains
//! - Knowledge-base queries over grid percepts

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use deduce_kb::{resolve, unify, Clause, KnowledgeBase, ResolutionProver, Term};
use std::hint::black_box;

fn pos(x: Term, y: Term) -> Term {
    Term::function("pos", vec![x, y])
}

fn cell(x: i64, y: i64) -> Term {
    pos(Term::constant(x), Term::constant(y))
}

fn pred(name: &str, at: Term) -> Term {
    Term::function(name, vec![at])
}

fn prop(i: usize) -> Term {
    Term::function(format!("P{}", i), vec![])
}

// ============================================================================
// Unification Benchmarks
// ============================================================================

fn bench_unification(c: &mut Criterion) {
    let mut group = c.benchmark_group("unification");

    group.bench_function("var_constant", |b| {
        let x = Term::variable("x");
        let five = Term::constant(5);
        b.iter(|| {
            let _ = unify(black_box(&x), black_box(&five));
        });
    });

    group.bench_function("offset_constant", |b| {
        let x = Term::offset_variable("x", -1);
        let five = Term::constant(5);
        b.iter(|| {
            let _ = unify(black_box(&x), black_box(&five));
        });
    });

    group.bench_function("nested_cell", |b| {
        let pattern = pred(
            "pit",
            pos(Term::offset_variable("x", 1), Term::offset_variable("y", -1)),
        );
        let target = pred("pit", cell(3, 4));
        b.iter(|| {
            let _ = unify(black_box(&pattern), black_box(&target));
        });
    });

    group.bench_function("alias_chain", |b| {
        let args = |prefix: &str| {
            (0..8)
                .map(|i| Term::offset_variable(format!("{}{}", prefix, i), i))
                .collect::<Vec<_>>()
        };
        let left = Term::function("f", args("x"));
        let right = Term::function("f", args("y"));
        b.iter(|| {
            let _ = unify(black_box(&left), black_box(&right));
        });
    });

    group.finish();
}

// ============================================================================
// Resolution Benchmarks
// ============================================================================

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    group.bench_function("rule_fact", |b| {
        let here = pos(Term::variable("x"), Term::variable("y"));
        let rule = Clause::new(
            [pred("breezy", here)],
            [pred("pit", pos(Term::offset_variable("x", 1), Term::variable("y")))],
        );
        let fact = Clause::positive(pred("pit", cell(2, 3)));
        b.iter(|| {
            let _ = resolve(black_box(&rule), black_box(&fact));
        });
    });

    group.bench_function("wide_disjunction", |b| {
        let here = pos(Term::variable("x"), Term::variable("y"));
        let neighbours = [(1, 0), (-1, 0), (0, 1), (0, -1)].map(|(dx, dy)| {
            pred(
                "pit",
                pos(Term::offset_variable("x", dx), Term::offset_variable("y", dy)),
            )
        });
        let rule = Clause::new(neighbours, [pred("breezy", here)]);
        let fact = Clause::negative(pred("pit", cell(2, 3)));
        b.iter(|| {
            let _ = resolve(black_box(&rule), black_box(&fact));
        });
    });

    group.finish();
}

fn bench_saturation_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("saturation_scaling");

    // P0, P0 → P1, ..., P(n-1) → Pn, ¬Pn
    for size in [4, 8, 16].iter() {
        group.bench_with_input(BenchmarkId::new("implication_chain", size), size, |b, &size| {
            let mut clauses = vec![Clause::positive(prop(0))];
            for i in 0..size {
                clauses.push(Clause::new([prop(i + 1)], [prop(i)]));
            }
            clauses.push(Clause::negative(prop(size)));
            b.iter(|| {
                let mut prover = ResolutionProver::new();
                let _ = prover.refute(black_box(clauses.clone()));
            });
        });
    }

    group.finish();
}

// ============================================================================
// Knowledge Base Benchmarks
// ============================================================================

fn bench_knowledge_base(c: &mut Criterion) {
    let mut group = c.benchmark_group("knowledge_base");

    for percepts in [2, 4, 8].iter() {
        group.bench_with_input(BenchmarkId::new("ask_pit_free", percepts), percepts, |b, &n| {
            let here = pos(Term::variable("x"), Term::variable("y"));
            let mut kb = KnowledgeBase::new([Clause::new(
                [pred("breezy", here)],
                [pred("pit", pos(Term::offset_variable("x", 1), Term::variable("y")))],
            )]);
            for x in 0..n {
                kb.tell(Clause::negative(pred("breezy", cell(x, 0))));
            }
            let query = Clause::negative(pred("pit", cell(n, 0)));
            b.iter(|| {
                let _ = kb.ask(black_box(&query));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_unification,
    bench_resolve,
    bench_saturation_scaling,
    bench_knowledge_base
);
criterion_main!(benches);
