use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use transducers::prelude::*;

/// A counter modulo `2 * n` which reports whether the count is even. The outputs only depend
/// on the parity of the count, so minimization collapses it to two states.
fn doubled_counter(n: usize) -> MealyMachine {
    let states: Vec<String> = (0..2 * n).map(|i| format!("s{i}")).collect();
    let mut transitions = vec![];
    for i in 0..2 * n {
        let next = (i + 1) % (2 * n);
        let output = if next % 2 == 0 { "even" } else { "odd" };
        transitions.push((states[i].clone(), "inc".to_string(), output.to_string(), states[next].clone()));
        transitions.push((states[i].clone(), "keep".to_string(), "same".to_string(), states[i].clone()));
    }
    MealyMachine::new(states, ["inc", "keep"], transitions).unwrap()
}

fn bench_minimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize");
    for n in [8, 32, 128] {
        let mm = doubled_counter(n);
        group.bench_with_input(BenchmarkId::new("mealy", n), &mm, |b, mm| {
            b.iter(|| black_box(mm.minimize()))
        });
        let moore = mm.clone().into_moore();
        group.bench_with_input(BenchmarkId::new("moore", n), &moore, |b, mm| {
            b.iter(|| black_box(mm.minimize()))
        });
    }
    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let mm = doubled_counter(64);
    c.bench_function("mealy_to_moore", |b| {
        b.iter(|| black_box(mm.clone().into_moore()))
    });
}

criterion_group!(benches, bench_minimize, bench_convert);
criterion_main!(benches);
