//! Export benchmarks.
//!
//! Renders one fixed graph in every output format.
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
use knows_export::{OutputFormat, export};

fn export_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("export");
    group.sample_size(20);

    let graph = GraphBenchParams {
        node_count: 1_000,
        edges_per_node: 4,
    }
    .graph()?;
    // Surface exporter errors during setup rather than inside the timed loop.
    for format in OutputFormat::ALL {
        export(&graph, format)?;
    }

    for format in OutputFormat::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(format),
            &graph,
            |b, graph| {
                b.iter(|| export(graph, format));
            },
        );
    }

    group.finish();
    Ok(())
}

fn export_all(c: &mut Criterion) {
    if let Err(err) = export_impl(c) {
        panic!("export benchmark setup failed: {err}");
    }
}

criterion_group!(benches, export_all);
criterion_main!(benches);
