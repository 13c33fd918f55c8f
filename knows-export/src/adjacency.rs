//! Line-oriented adjacency and edge list formats.
//!
//! Attribute maps are written as compact JSON objects.

use knows_core::{Edge, PropertyGraph};
use serde_json::Value;

use crate::attributes::json_attributes;

/// `<node> <successor>...`, one line per node.
pub(crate) fn render_adjacency_list(graph: &PropertyGraph) -> String {
    graph
        .nodes()
        .map(|node| {
            std::iter::once(node.id())
                .chain(graph.out_neighbours(node.id()).into_iter().map(|next| next.id()))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `<node> <count>` followed by `<successor> <attributes>` lines.
pub(crate) fn render_multiline_adjacency_list(graph: &PropertyGraph) -> String {
    let mut lines = Vec::with_capacity(graph.node_count() + graph.edge_count());
    for node in graph.nodes() {
        let successors = graph.out_neighbours(node.id());
        lines.push(format!("{} {}", node.id(), successors.len()));
        for next in successors {
            if let Some(edge) = graph.edge(node.id(), next.id()) {
                lines.push(format!("{} {}", next.id(), attributes(edge)));
            }
        }
    }
    lines.join("\n")
}

/// `<source> <target> <attributes>`, one line per edge.
pub(crate) fn render_edge_list(graph: &PropertyGraph) -> String {
    graph
        .edges()
        .map(|edge| {
            format!(
                "{} {} {}",
                edge.source.id(),
                edge.target.id(),
                attributes(edge.edge)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn attributes(edge: &Edge) -> Value {
    Value::Object(json_attributes(edge.label(), edge.properties()))
}
