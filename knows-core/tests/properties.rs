//! Property-based checks of the structural invariants of generation.

mod common;

use std::collections::HashSet;

use knows_core::{GraphGenerator, PropertyGraph, PropertyValue, max_edges};
use proptest::prelude::*;

fn counts() -> impl Strategy<Value = (usize, usize)> {
    (2_usize..=12).prop_flat_map(|nodes| {
        let max = max_edges(nodes).unwrap_or(0);
        (Just(nodes), 0..=max)
    })
}

fn with_degree(nodes: usize, edges: usize, seed: u64) -> PropertyGraph {
    let schema = common::schema(
        r#"{
            "edgeProperties": {
                "since": {"type": "Date", "symmetric": true},
                "weight": {"type": "Float", "symmetric": false}
            },
            "computedNodeProperties": {"degree": "degree"}
        }"#,
    );
    GraphGenerator::builder(nodes, edges)
        .with_schema(schema)
        .with_seed(seed)
        .build()
        .expect("strategy only yields valid counts")
        .generate()
}

proptest! {
    #![proptest_config(common::suite_proptest_config(48))]

    #[test]
    fn counts_and_simplicity_hold((nodes, edges) in counts(), seed in any::<u64>()) {
        let graph = with_degree(nodes, edges, seed);
        prop_assert_eq!(graph.node_count(), nodes);
        prop_assert_eq!(graph.edge_count(), edges);

        let mut pairs = HashSet::new();
        for edge in graph.edges() {
            prop_assert_ne!(edge.source.id(), edge.target.id());
            prop_assert!(pairs.insert((edge.source.id(), edge.target.id())));
        }
    }

    #[test]
    fn symmetric_values_agree((nodes, edges) in counts(), seed in any::<u64>()) {
        let graph = with_degree(nodes, edges, seed);
        for edge in graph.edges() {
            if let Some(reverse) = graph.edge(edge.target.id(), edge.source.id()) {
                prop_assert_eq!(
                    edge.edge.properties().get("since"),
                    reverse.properties().get("since")
                );
            }
        }
    }

    #[test]
    fn degree_counts_distinct_neighbours((nodes, edges) in counts(), seed in any::<u64>()) {
        let graph = with_degree(nodes, edges, seed);
        for node in graph.nodes() {
            let mut neighbours = HashSet::new();
            for edge in graph.edges() {
                if edge.source.id() == node.id() {
                    neighbours.insert(edge.target.id());
                }
                if edge.target.id() == node.id() {
                    neighbours.insert(edge.source.id());
                }
            }
            let recorded = node.properties().get("degree").and_then(PropertyValue::as_i64);
            prop_assert_eq!(recorded, i64::try_from(neighbours.len()).ok());
        }
    }

    #[test]
    fn seeds_make_generation_deterministic((nodes, edges) in counts(), seed in any::<u64>()) {
        let snapshot = |graph: &PropertyGraph| {
            let nodes: Vec<_> = graph.nodes().map(|node| node.properties().clone()).collect();
            let edges: Vec<_> = graph
                .edges()
                .map(|edge| (edge.source.id().to_owned(), edge.target.id().to_owned(), edge.edge.properties().clone()))
                .collect();
            (nodes, edges)
        };
        prop_assert_eq!(
            snapshot(&with_degree(nodes, edges, seed)),
            snapshot(&with_degree(nodes, edges, seed))
        );
    }

    #[test]
    fn oversized_edge_counts_are_rejected(nodes in 2_usize..=30, excess in 1_usize..=50) {
        let max = max_edges(nodes).unwrap_or(usize::MAX);
        let result = GraphGenerator::builder(nodes, max + excess).build();
        prop_assert!(result.is_err_and(|err| err.code().as_str() == "KNOWS_INVALID_PARAMETERS"));
    }
}
