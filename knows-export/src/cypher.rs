//! Cypher `CREATE` statements.

use std::borrow::Cow;

use knows_core::{PropertyGraph, PropertyMap};

use crate::text::{is_identifier, quoted};

pub(crate) fn render(graph: &PropertyGraph) -> String {
    let nodes = graph.nodes().map(|node| {
        format!(
            "CREATE ({}:{} {{{}}})",
            node.id(),
            name(node.label()),
            property_list(node.properties())
        )
    });
    let edges = graph.edges().map(|edge| {
        format!(
            "CREATE ({})-[:{} {{{}}}]->({})",
            edge.source.id(),
            name(edge.edge.label()),
            property_list(edge.edge.properties()),
            edge.target.id()
        )
    });
    nodes.chain(edges).collect::<Vec<_>>().join("\n")
}

/// Label or key, backtick-quoted unless it is a bare identifier.
fn name(raw: &str) -> Cow<'_, str> {
    if is_identifier(raw) {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(format!("`{}`", raw.replace('`', "``")))
    }
}

fn property_list(properties: &PropertyMap) -> String {
    properties
        .iter()
        .map(|(key, value)| format!("{}: {}", name(key), quoted(&value.to_string())))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use knows_core::{Edge, PropertyValue};
    use rstest::rstest;

    fn pair() -> PropertyGraph {
        let mut graph = PropertyGraph::new();
        let ann: PropertyMap = [
            ("firstName", PropertyValue::from("Ann")),
            ("lastName", PropertyValue::from("Lee")),
        ]
        .into_iter()
        .collect();
        graph.add_node("N1", "Person", ann).expect("fresh node");
        graph.add_node("N2", "Person", PropertyMap::new()).expect("fresh node");
        let props: PropertyMap = [("strength", PropertyValue::from(5_i64))].into_iter().collect();
        graph
            .add_edge("N1", "N2", Edge::new("knows", props))
            .expect("valid edge");
        graph
    }

    #[rstest]
    fn renders_create_statements() {
        assert_eq!(
            render(&pair()),
            "CREATE (N1:Person {firstName: \"Ann\", lastName: \"Lee\"})\n\
             CREATE (N2:Person {})\n\
             CREATE (N1)-[:knows {strength: \"5\"}]->(N2)"
        );
    }

    #[rstest]
    #[case("Person", "Person")]
    #[case("has space", "`has space`")]
    #[case("odd`tick", "`odd``tick`")]
    fn quotes_names_when_needed(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(name(raw), expected);
    }
}
