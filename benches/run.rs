use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dfa_sim::{
    prelude::*,
    random::{generate_random_dfa, generate_random_word},
};

fn process(c: &mut Criterion) {
    let mut group = c.benchmark_group("process");
    for size in [10, 100, 1000] {
        let dfa = generate_random_dfa(4, size, 0.5);
        let words = (0..100)
            .map(|_| generate_random_word(&dfa.alphabet, 50, 200))
            .collect::<Vec<_>>();
        let executor = dfa.executor();
        group.bench_with_input(BenchmarkId::from_parameter(size), &words, |b, words| {
            b.iter(|| {
                for word in words {
                    black_box(executor.process(word));
                }
            })
        });
    }
    group.finish();
}

fn validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    for size in [10, 100, 1000] {
        let dfa = generate_random_dfa(4, size, 0.5);
        group.bench_with_input(BenchmarkId::from_parameter(size), &dfa, |b, dfa| {
            b.iter(|| black_box(dfa.validate()))
        });
    }
    group.finish();
}

criterion_group!(benches, process, validate);
criterion_main!(benches);
