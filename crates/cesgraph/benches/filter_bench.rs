//! Criterion benches for overlap pruning, context restriction and color decomposition.

use cesgraph::ces::{
    build_ces, decompose_ces_by_color, filter_by_overlap, restrict_to_context, CesCfg, ContextMode,
};
use cesgraph::synth::{generate, SynthParams};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("ces_views");
    for &k in &[16usize, 63] {
        let params = SynthParams {
            n_nodes: 6,
            n_distinctions: k,
            relation_density: 0.7,
            face_keep: 0.6,
        };
        let s = generate(&params, 11).unwrap();
        let ces = build_ces(&s.universe, &s.distinctions, &s.relations, CesCfg::default()).unwrap();
        let context: Vec<String> = ces.face4.nodes().take(k / 4).map(|n| n.label.clone()).collect();

        group.bench_with_input(BenchmarkId::new("filter_by_overlap", k), &ces, |b, ces| {
            b.iter(|| filter_by_overlap(ces).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("restrict_any", k), &ces, |b, ces| {
            b.iter(|| restrict_to_context(ces, &context, ContextMode::Any))
        });
        group.bench_with_input(BenchmarkId::new("decompose_color", k), &ces, |b, ces| {
            b.iter(|| decompose_ces_by_color(ces))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filter);
criterion_main!(benches);
