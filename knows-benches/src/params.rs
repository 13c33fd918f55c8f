//! Benchmark parameter types and seeded fixtures.

use std::fmt;

use knows_core::{GraphGenerator, PropertyGraph, max_edges};

use crate::error::BenchSetupError;

/// Seed shared by every benchmark fixture.
pub const SEED: u64 = 42;

/// Size of one generation benchmark run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GraphBenchParams {
    /// Number of nodes.
    pub node_count: usize,
    /// Requested average out-degree.
    pub edges_per_node: usize,
}

impl GraphBenchParams {
    /// Edge count for this run, capped at the simple-digraph maximum.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let requested = self.node_count.saturating_mul(self.edges_per_node);
        max_edges(self.node_count).map_or(requested, |max| requested.min(max))
    }

    /// Generator for this run with the default property selection.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::Generation`] when the counts are invalid.
    pub fn generator(&self) -> Result<GraphGenerator, BenchSetupError> {
        Ok(GraphGenerator::builder(self.node_count, self.edge_count())
            .with_seed(SEED)
            .build()?)
    }

    /// Graph generated with [`SEED`].
    ///
    /// # Errors
    /// See [`Self::generator`].
    pub fn graph(&self) -> Result<PropertyGraph, BenchSetupError> {
        Ok(self.generator()?.generate())
    }
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},e={}", self.node_count, self.edge_count())
    }
}
