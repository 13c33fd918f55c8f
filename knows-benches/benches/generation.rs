//! Graph generation benchmarks.
//!
//! Measures a full generation pass (nodes, rejection-sampled edges and
//! default properties) across sizes and densities.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use knows_benches::{error::BenchSetupError, params::GraphBenchParams};

/// Node counts to benchmark.
const NODE_COUNTS: &[usize] = &[100, 1_000, 10_000];

/// Average out-degrees to benchmark.
const EDGES_PER_NODE: &[usize] = &[1, 8];

fn generate_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("generate");
    group.sample_size(20);

    for &node_count in NODE_COUNTS {
        for &edges_per_node in EDGES_PER_NODE {
            let params = GraphBenchParams {
                node_count,
                edges_per_node,
            };
            let generator = params.generator()?;
            group.bench_with_input(
                BenchmarkId::from_parameter(&params),
                &generator,
                |b, generator| {
                    b.iter(|| generator.generate());
                },
            );
        }
    }

    group.finish();
    Ok(())
}

/// Dense graphs where rejection sampling dominates.
fn generate_dense_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("generate_dense");
    group.sample_size(10);

    for &node_count in &[50_usize, 200] {
        let params = GraphBenchParams {
            node_count,
            edges_per_node: node_count,
        };
        let generator = params.generator()?;
        group.bench_with_input(
            BenchmarkId::from_parameter(&params),
            &generator,
            |b, generator| {
                b.iter(|| generator.generate());
            },
        );
    }

    group.finish();
    Ok(())
}

fn generate(c: &mut Criterion) {
    if let Err(err) = generate_impl(c) {
        panic!("generate benchmark setup failed: {err}");
    }
}

fn generate_dense(c: &mut Criterion) {
    if let Err(err) = generate_dense_impl(c) {
        panic!("generate_dense benchmark setup failed: {err}");
    }
}

criterion_group!(benches, generate, generate_dense);
criterion_main!(benches);
