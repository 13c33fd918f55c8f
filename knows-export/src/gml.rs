//! GML markup.
//!
//! Nodes are numbered in creation order and carry their identifier as
//! `label`; the node label itself is written under `nodeLabel`. Edges keep
//! their label under `label`. Booleans are written as `1`/`0` and integers
//! outside the 32-bit range as strings.

use std::collections::HashMap;

use knows_core::{PropertyGraph, PropertyMap, PropertyValue};

use crate::error::ExportError;

/// Key holding the node label, since `label` holds the node identifier.
const NODE_LABEL_KEY: &str = "nodeLabel";

pub(crate) fn render(graph: &PropertyGraph) -> Result<String, ExportError> {
    let mut lines = vec!["graph [".to_owned(), "  directed 1".to_owned()];
    let mut positions = HashMap::with_capacity(graph.node_count());

    for (position, node) in graph.nodes().enumerate() {
        positions.insert(node.id(), position);
        lines.push("  node [".to_owned());
        lines.push(format!("    id {position}"));
        lines.push(format!("    label {}", string(node.id())));
        lines.push(format!("    {NODE_LABEL_KEY} {}", string(node.label())));
        push_properties(&mut lines, node.properties())?;
        lines.push("  ]".to_owned());
    }
    for edge in graph.edges() {
        let (Some(source), Some(target)) = (
            positions.get(edge.source.id()),
            positions.get(edge.target.id()),
        ) else {
            continue;
        };
        lines.push("  edge [".to_owned());
        lines.push(format!("    source {source}"));
        lines.push(format!("    target {target}"));
        lines.push(format!("    label {}", string(edge.edge.label())));
        push_properties(&mut lines, edge.edge.properties())?;
        lines.push("  ]".to_owned());
    }
    lines.push("]".to_owned());
    Ok(lines.join("\n"))
}

fn push_properties(lines: &mut Vec<String>, properties: &PropertyMap) -> Result<(), ExportError> {
    for (key, value) in properties.iter() {
        if !is_gml_key(key) {
            return Err(ExportError::InvalidGmlKey {
                key: key.to_owned(),
            });
        }
        lines.push(format!("    {key} {}", scalar(value)));
    }
    Ok(())
}

/// GML keys start with a letter followed by letters, digits or `_`.
fn is_gml_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

fn scalar(value: &PropertyValue) -> String {
    match value {
        PropertyValue::String(text) => string(text),
        PropertyValue::Int(number) if i32::try_from(*number).is_ok() => number.to_string(),
        PropertyValue::Int(number) => string(&number.to_string()),
        PropertyValue::Float(number) if number.is_nan() => "NAN".to_owned(),
        PropertyValue::Float(number) if number.is_infinite() => {
            let sign = if number.is_sign_negative() { "-" } else { "" };
            format!("{sign}INF")
        }
        PropertyValue::Float(_) => value.to_string(),
        PropertyValue::Bool(flag) => u8::from(*flag).to_string(),
    }
}

fn string(raw: &str) -> String {
    format!("\"{}\"", raw.replace('&', "&amp;").replace('"', "&quot;"))
}
