//! Formula evaluation benchmarks.
//!
//! Run with:
//! ```bash
//! cargo bench --bench evaluate
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::Array2;

use kripke_rs::eval::Evaluator;
use kripke_rs::model::KripkeModel;
use kripke_rs::parser::parse_formula;

/// A model with `n` worlds and variables `P0..P7`.
///
/// World `i` sees `i`, `i + 1`, and `2 * i` (mod `n`); `Pk` holds in world `i`
/// iff bit `k` of `i * 37` is set. Deterministic, so runs are comparable.
fn ring_model(n: usize) -> KripkeModel {
    let worlds: Vec<String> = (0..n).map(|i| format!("w{:05}", i)).collect();
    let vars: Vec<String> = (0..8).map(|k| format!("P{}", k)).collect();
    let valuation = Array2::from_shape_fn((n, vars.len()), |(i, k)| (((i * 37) >> k) & 1) as u8);
    let access = Array2::from_shape_fn((n, n), |(i, j)| {
        u8::from(j == i || j == (i + 1) % n || j == (2 * i) % n)
    });
    KripkeModel::new(worlds, vars, valuation, access).unwrap()
}

fn bench_evaluate(c: &mut Criterion) {
    let formula = parse_formula("#(P0 && @P1) -> !(P2 || @#P3) && (@P4 || #!P5)").unwrap();

    let mut group = c.benchmark_group("evaluate");
    for n in [16, 128, 512] {
        let model = ring_model(n);
        let evaluator = Evaluator::new(&model);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &formula, |b, formula| {
            b.iter(|| evaluator.evaluate(formula).unwrap())
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let text = (0..64).map(|k| format!("#@P{}", k)).collect::<Vec<_>>().join(" && ");
    c.bench_function("parse_formula", |b| b.iter(|| parse_formula(&text).unwrap()));
}

criterion_group!(benches, bench_evaluate, bench_parse);
criterion_main!(benches);
