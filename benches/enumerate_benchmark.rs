use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use walkjoin::{Adjacency, CandidateStrategy, EnumerationConfig, Enumerator, Pattern};

fn build_graph(nodes: usize, degree: usize) -> Adjacency {
    // Deterministic pseudo-random neighbors, symmetrized afterwards
    let edges = (0..nodes).flat_map(|i| (1..=degree).map(move |j| (i, (i * 31 + j * 7919) % nodes)));
    Adjacency::from_edges(nodes, edges)
        .and_then(|g| g.symmetrize())
        .unwrap()
}

fn bench_patterns(c: &mut Criterion) {
    let graph = build_graph(2000, 8);
    let patterns = [
        ("path4", Pattern::path(4).unwrap()),
        ("clique3", Pattern::clique(3).unwrap()),
        ("cycle4", Pattern::cycle(4).unwrap()),
    ];

    let mut group = c.benchmark_group("enumerate");
    for threads in [1, 4] {
        let e = Enumerator::new(EnumerationConfig::default().with_threads(threads)).unwrap();
        for (name, pattern) in &patterns {
            group.bench_with_input(BenchmarkId::new(*name, threads), pattern, |b, p| {
                b.iter(|| black_box(e.count(&graph, p).unwrap().count));
            });
        }
    }
    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let graph = build_graph(1000, 16);
    let pattern = Pattern::clique(4).unwrap();

    let mut group = c.benchmark_group("candidate_strategy");
    for strategy in [CandidateStrategy::Intersect, CandidateStrategy::Count] {
        let e = Enumerator::new(
            EnumerationConfig::default()
                .with_threads(4)
                .with_strategy(strategy),
        )
        .unwrap();
        group.bench_function(format!("{strategy:?}"), |b| {
            b.iter(|| black_box(e.enumerate(&graph, &pattern).unwrap().len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_patterns, bench_strategies);
criterion_main!(benches);
