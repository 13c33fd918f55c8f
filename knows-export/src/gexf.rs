//! GEXF 1.2 markup.

use knows_core::{PropertyGraph, PropertyMap};

use crate::{
    attributes::{AttributeKey, LABEL_KEY, collect_keys, markup_type},
    text::xml_escape,
};

const HEADER: [&str; 3] = [
    "<?xml version='1.0' encoding='utf-8'?>",
    concat!(
        "<gexf xmlns=\"http://www.gexf.net/1.2draft\" ",
        "xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" ",
        "xsi:schemaLocation=\"http://www.gexf.net/1.2draft ",
        "http://www.gexf.net/1.2draft/gexf.xsd\" version=\"1.2\">"
    ),
    "  <graph defaultedgetype=\"directed\" mode=\"static\">",
];

pub(crate) fn render(graph: &PropertyGraph) -> String {
    // Labels are element attributes in GEXF, not declared columns.
    let node_keys = property_keys(graph.nodes().map(|node| node.properties()));
    let edge_keys = property_keys(graph.edges().map(|edge| edge.edge.properties()));

    let mut lines: Vec<String> = HEADER.iter().map(|line| (*line).to_owned()).collect();
    declare_attributes(&mut lines, "node", &node_keys);
    declare_attributes(&mut lines, "edge", &edge_keys);

    lines.push("    <nodes>".to_owned());
    for node in graph.nodes() {
        let open = format!(
            "      <node id=\"{}\" label=\"{}\"",
            xml_escape(node.id()),
            xml_escape(node.label())
        );
        push_element(&mut lines, &open, "node", node.properties(), &node_keys);
    }
    lines.push("    </nodes>".to_owned());

    lines.push("    <edges>".to_owned());
    for (position, edge) in graph.edges().enumerate() {
        let open = format!(
            "      <edge source=\"{}\" target=\"{}\" id=\"{position}\" label=\"{}\"",
            xml_escape(edge.source.id()),
            xml_escape(edge.target.id()),
            xml_escape(edge.edge.label())
        );
        push_element(&mut lines, &open, "edge", edge.edge.properties(), &edge_keys);
    }
    lines.push("    </edges>".to_owned());
    lines.push("  </graph>".to_owned());
    lines.push("</gexf>".to_owned());
    lines.join("\n")
}

fn property_keys<'a>(maps: impl Iterator<Item = &'a PropertyMap>) -> Vec<AttributeKey<'a>> {
    collect_keys(maps)
        .into_iter()
        .filter(|key| key.name != LABEL_KEY)
        .collect()
}

fn declare_attributes(lines: &mut Vec<String>, class: &str, keys: &[AttributeKey<'_>]) {
    if keys.is_empty() {
        return;
    }
    lines.push(format!(
        "    <attributes class=\"{class}\" mode=\"static\">"
    ));
    lines.extend(keys.iter().enumerate().map(|(position, key)| {
        format!(
            "      <attribute id=\"{position}\" title=\"{}\" type=\"{}\" />",
            xml_escape(key.name),
            markup_type(key.kind)
        )
    }));
    lines.push("    </attributes>".to_owned());
}

/// Closes the opening tag `open`, nesting `<attvalues>` when the element
/// carries any declared attribute.
fn push_element(
    lines: &mut Vec<String>,
    open: &str,
    element: &str,
    properties: &PropertyMap,
    keys: &[AttributeKey<'_>],
) {
    let values: Vec<String> = keys
        .iter()
        .enumerate()
        .filter_map(|(position, key)| {
            properties.get(key.name).map(|value| {
                format!(
                    "          <attvalue for=\"{position}\" value=\"{}\" />",
                    xml_escape(&value.to_string())
                )
            })
        })
        .collect();
    if values.is_empty() {
        lines.push(format!("{open} />"));
        return;
    }
    lines.push(format!("{open}>"));
    lines.push("        <attvalues>".to_owned());
    lines.extend(values);
    lines.push("        </attvalues>".to_owned());
    lines.push(format!("      </{element}>"));
}
