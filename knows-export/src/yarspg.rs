//! YARS-PG statements: one per node, then one per edge.

use knows_core::{PropertyGraph, PropertyMap};

use crate::text::quoted;

pub(crate) fn render(graph: &PropertyGraph) -> String {
    let nodes = graph.nodes().map(|node| {
        format!(
            "({} {{{}}}[{}])",
            node.id(),
            quoted(node.label()),
            property_list(node.properties())
        )
    });
    let edges = graph.edges().map(|edge| {
        format!(
            "({})-({{{}}}[{}])->({})",
            edge.source.id(),
            quoted(edge.edge.label()),
            property_list(edge.edge.properties()),
            edge.target.id()
        )
    });
    nodes.chain(edges).collect::<Vec<_>>().join("\n")
}

fn property_list(properties: &PropertyMap) -> String {
    properties
        .iter()
        .map(|(name, value)| format!("{}: {}", quoted(name), quoted(&value.to_string())))
        .collect::<Vec<_>>()
        .join(", ")
}
