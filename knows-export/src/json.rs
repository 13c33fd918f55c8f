//! Node-link JSON document.

use knows_core::PropertyGraph;
use serde_json::{Value, json};

use crate::attributes::json_attributes;

pub(crate) fn render(graph: &PropertyGraph) -> String {
    let nodes: Vec<Value> = graph
        .nodes()
        .map(|node| {
            let mut object = json_attributes(node.label(), node.properties());
            object.insert("id".to_owned(), Value::from(node.id()));
            Value::Object(object)
        })
        .collect();
    let edges: Vec<Value> = graph
        .edges()
        .map(|edge| {
            let mut object = json_attributes(edge.edge.label(), edge.edge.properties());
            object.insert("source".to_owned(), Value::from(edge.source.id()));
            object.insert("target".to_owned(), Value::from(edge.target.id()));
            Value::Object(object)
        })
        .collect();

    json!({
        "directed": true,
        "multigraph": false,
        "graph": {},
        "nodes": nodes,
        "edges": edges,
    })
    .to_string()
}
