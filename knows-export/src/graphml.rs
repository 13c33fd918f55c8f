//! GraphML markup with typed `<key>` declarations.

use knows_core::{PropertyGraph, PropertyMap};

use crate::{
    attributes::{AttributeKey, cell, collect_keys, markup_type},
    text::xml_escape,
};

const HEADER: [&str; 2] = [
    "<?xml version='1.0' encoding='utf-8'?>",
    concat!(
        "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\" ",
        "xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" ",
        "xsi:schemaLocation=\"http://graphml.graphdrawing.org/xmlns ",
        "http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd\">"
    ),
];

pub(crate) fn render(graph: &PropertyGraph) -> String {
    let node_keys = collect_keys(graph.nodes().map(|node| node.properties()));
    let edge_keys = collect_keys(graph.edges().map(|edge| edge.edge.properties()));
    let edge_offset = node_keys.len();

    let mut lines: Vec<String> = HEADER.iter().map(|line| (*line).to_owned()).collect();
    declare_keys(&mut lines, "node", &node_keys, 0);
    declare_keys(&mut lines, "edge", &edge_keys, edge_offset);
    lines.push("  <graph edgedefault=\"directed\">".to_owned());
    for node in graph.nodes() {
        lines.push(format!("    <node id=\"{}\">", xml_escape(node.id())));
        push_data(&mut lines, node.label(), node.properties(), &node_keys, 0);
        lines.push("    </node>".to_owned());
    }
    for edge in graph.edges() {
        lines.push(format!(
            "    <edge source=\"{}\" target=\"{}\">",
            xml_escape(edge.source.id()),
            xml_escape(edge.target.id())
        ));
        push_data(
            &mut lines,
            edge.edge.label(),
            edge.edge.properties(),
            &edge_keys,
            edge_offset,
        );
        lines.push("    </edge>".to_owned());
    }
    lines.push("  </graph>".to_owned());
    lines.push("</graphml>".to_owned());
    lines.join("\n")
}

fn declare_keys(lines: &mut Vec<String>, domain: &str, keys: &[AttributeKey<'_>], offset: usize) {
    lines.extend(keys.iter().enumerate().map(|(position, key)| {
        format!(
            "  <key id=\"d{}\" for=\"{domain}\" attr.name=\"{}\" attr.type=\"{}\" />",
            offset + position,
            xml_escape(key.name),
            markup_type(key.kind)
        )
    }));
}

fn push_data(
    lines: &mut Vec<String>,
    label: &str,
    properties: &PropertyMap,
    keys: &[AttributeKey<'_>],
    offset: usize,
) {
    lines.extend(keys.iter().enumerate().filter_map(|(position, key)| {
        cell(label, properties, key.name).map(|value| {
            format!(
                "      <data key=\"d{}\">{}</data>",
                offset + position,
                xml_escape(&value)
            )
        })
    }));
}
