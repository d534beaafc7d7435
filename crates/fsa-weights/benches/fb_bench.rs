// Criterion benchmarks for fsa-weights.
//
// Builds layered lattices (every state of one layer linked to every state of
// the next) and times the forward/backward passes under both semirings.
//
// Run:
//   cargo bench -p fsa-weights

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fsa_core::{Arc, FINAL_SYMBOL, Fsa};
use fsa_weights::{FbWeightType, WfsaWithFbWeights, compute_forward_max_weights};

// ---------------------------------------------------------------------------
// Lattice construction
// ---------------------------------------------------------------------------

/// A lattice with a start state, `layers` layers of `width` states, and a
/// final state. Arc weights are a fixed pseudo-random pattern in `[-4, 0)`.
fn layered_lattice(layers: usize, width: usize) -> (Fsa, Vec<f32>) {
    let num_states = 2 + layers * width;
    let final_state = (num_states - 1) as i32;
    let state = |layer: usize, i: usize| (1 + layer * width + i) as i32;

    let mut arcs = Vec::new();
    for i in 0..width {
        arcs.push(Arc::new(0, state(0, i), 1 + i as i32));
    }
    for layer in 0..layers - 1 {
        for i in 0..width {
            for j in 0..width {
                arcs.push(Arc::new(state(layer, i), state(layer + 1, j), 1 + j as i32));
            }
        }
    }
    for i in 0..width {
        arcs.push(Arc::new(state(layers - 1, i), final_state, FINAL_SYMBOL));
    }

    let weights = (0..arcs.len())
        .map(|k| -((k.wrapping_mul(2_654_435_761) % 4096) as f32) / 1024.0)
        .collect();
    let fsa = Fsa::from_arcs(num_states, arcs).expect("lattice arcs are in range");
    (fsa, weights)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Both passes through the aggregate, for each semiring.
fn bench_wfsa_new(c: &mut Criterion) {
    let mut group = c.benchmark_group("wfsa_new");
    for (layers, width) in [(100, 8), (500, 16)] {
        let (fsa, weights) = layered_lattice(layers, width);
        for t in [FbWeightType::MaxWeight, FbWeightType::LogSumWeight] {
            let id = BenchmarkId::new(t.to_string(), format!("{layers}x{width}"));
            group.bench_with_input(id, &t, |b, &t| {
                b.iter(|| std::hint::black_box(WfsaWithFbWeights::new(&fsa, &weights, t)));
            });
        }
    }
    group.finish();
}

/// Forward pass only, into a reused buffer.
fn bench_forward_max(c: &mut Criterion) {
    let (fsa, weights) = layered_lattice(500, 16);
    let mut out = vec![0.0f32; fsa.num_states()];
    c.bench_function("forward_max_500x16", |b| {
        b.iter(|| {
            compute_forward_max_weights(&fsa, &weights, &mut out);
            std::hint::black_box(&out);
        });
    });
}

criterion_group!(benches, bench_wfsa_new, bench_forward_max);
criterion_main!(benches);
