//! Node and edge tables with a header row.
//!
//! Node columns are `id` followed by every attribute key in first-seen
//! order; edge columns are `id,id_from,id_to` followed by the edge keys.
//! Edge ids are `E1`, `E2`, ... in insertion order. Absent values are
//! written as empty fields.

use knows_core::PropertyGraph;

use crate::{
    attributes::{AttributeKey, cell, collect_keys},
    text::csv_field,
};

pub(crate) fn render(graph: &PropertyGraph) -> (String, String) {
    let node_keys = collect_keys(graph.nodes().map(|node| node.properties()));
    let mut nodes = vec![header(&["id"], &node_keys)];
    nodes.extend(graph.nodes().map(|node| {
        row(
            &[node.id()],
            node_keys
                .iter()
                .map(|key| cell(node.label(), node.properties(), key.name)),
        )
    }));

    let edge_keys = collect_keys(graph.edges().map(|edge| edge.edge.properties()));
    let mut edges = vec![header(&["id", "id_from", "id_to"], &edge_keys)];
    edges.extend(graph.edges().enumerate().map(|(position, edge)| {
        let id = format!("E{}", position + 1);
        row(
            &[id.as_str(), edge.source.id(), edge.target.id()],
            edge_keys
                .iter()
                .map(|key| cell(edge.edge.label(), edge.edge.properties(), key.name)),
        )
    }));

    (nodes.join("\n"), edges.join("\n"))
}

fn header(leading: &[&str], keys: &[AttributeKey<'_>]) -> String {
    leading
        .iter()
        .copied()
        .chain(keys.iter().map(|key| key.name))
        .map(csv_field)
        .collect::<Vec<_>>()
        .join(",")
}

fn row(leading: &[&str], cells: impl Iterator<Item = Option<String>>) -> String {
    let mut fields: Vec<String> = leading
        .iter()
        .map(|value| csv_field(value).into_owned())
        .collect();
    fields.extend(cells.map(|value| {
        value
            .as_deref()
            .map(|text| csv_field(text).into_owned())
            .unwrap_or_default()
    }));
    fields.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use knows_core::{Edge, PropertyMap, PropertyValue};
    use rstest::rstest;

    #[rstest]
    fn fills_missing_values_with_empty_fields() {
        let mut graph = PropertyGraph::new();
        let first: PropertyMap = [("name", PropertyValue::from("Smith, J"))].into_iter().collect();
        let second: PropertyMap = [("age", PropertyValue::from(41_i64))].into_iter().collect();
        graph.add_node("N1", "Person", first).expect("fresh node");
        graph.add_node("N2", "Person", second).expect("fresh node");
        graph
            .add_edge("N2", "N1", Edge::new("knows", PropertyMap::new()))
            .expect("valid edge");

        let (nodes, edges) = render(&graph);
        assert_eq!(
            nodes,
            "id,label,name,age\nN1,Person,\"Smith, J\",\nN2,Person,,41"
        );
        assert_eq!(edges, "id,id_from,id_to,label\nE1,N2,N1,knows");
    }
}
