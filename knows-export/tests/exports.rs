//! End-to-end checks of every format against generated graphs.

use knows_core::{GraphGenerator, PropertyGraph};
use knows_export::{DrawOptions, OutputFormat, Payload, export, export_with};
use rstest::{fixture, rstest};
use serde_json::Value;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use knows_test_support::tracing::RecordingLayer;

#[fixture]
fn graph() -> PropertyGraph {
    GraphGenerator::builder(6, 9)
        .with_node_properties(["firstName", "lastName", "friendCount"])
        .with_edge_properties(["strength", "lastMeetingDate"])
        .with_seed(42)
        .build()
        .expect("configuration must be valid")
        .generate()
}

fn text(payload: Payload) -> String {
    match payload {
        Payload::Text(text) => text,
        other => panic!("expected a single document, got {other:?}"),
    }
}

#[rstest]
fn every_format_renders(graph: PropertyGraph) {
    for format in OutputFormat::ALL {
        let payload = export(&graph, format).expect("built-in property names are valid");
        match (format, payload) {
            (OutputFormat::Csv, Payload::Csv { nodes, edges }) => {
                assert!(!nodes.is_empty() && !edges.is_empty());
            }
            (OutputFormat::Csv, other) => panic!("csv produced {other:?}"),
            (OutputFormat::Png | OutputFormat::Jpg | OutputFormat::Pdf, Payload::Binary(bytes)) => {
                assert!(!bytes.is_empty(), "{format} is empty");
            }
            (_, Payload::Text(text)) => assert!(!text.is_empty(), "{format} is empty"),
            (_, other) => panic!("{format} produced {other:?}"),
        }
    }
}

#[rstest]
fn csv_tables_have_headers_and_edge_ids(graph: PropertyGraph) {
    let Payload::Csv { nodes, edges } = export(&graph, OutputFormat::Csv).expect("csv renders")
    else {
        panic!("csv yields two tables");
    };
    let node_lines: Vec<_> = nodes.lines().collect();
    assert_eq!(node_lines.first(), Some(&"id,label,firstName,lastName,friendCount"));
    assert_eq!(node_lines.len(), 7);
    assert!(node_lines.get(1).is_some_and(|row| row.starts_with("N1,Person,")));

    let edge_lines: Vec<_> = edges.lines().collect();
    assert_eq!(
        edge_lines.first(),
        Some(&"id,id_from,id_to,label,strength,lastMeetingDate")
    );
    assert_eq!(edge_lines.len(), 10);
    for (position, row) in edge_lines.iter().skip(1).enumerate() {
        assert!(row.starts_with(&format!("E{},", position + 1)));
    }
}

#[rstest]
fn yarspg_and_cypher_have_one_statement_per_element(graph: PropertyGraph) {
    let yarspg = text(export(&graph, OutputFormat::YarsPg).expect("yarspg renders"));
    assert_eq!(yarspg.lines().count(), 15);
    assert!(yarspg.starts_with("(N1 {\"Person\"}[\"firstName\": "));
    assert_eq!(yarspg.matches("->(").count(), 9);

    let cypher = text(export(&graph, OutputFormat::Cypher).expect("cypher renders"));
    assert_eq!(cypher.lines().count(), 15);
    assert!(cypher.lines().all(|line| line.starts_with("CREATE (")));
    assert_eq!(cypher.matches("-[:knows {strength: ").count(), 9);
}

#[rstest]
fn json_is_node_link_shaped(graph: PropertyGraph) {
    let document: Value = serde_json::from_str(&text(
        export(&graph, OutputFormat::Json).expect("json renders"),
    ))
    .expect("output parses as JSON");

    assert_eq!(document["directed"], Value::Bool(true));
    assert_eq!(document["multigraph"], Value::Bool(false));
    let nodes = document["nodes"].as_array().expect("nodes array");
    let edges = document["edges"].as_array().expect("edges array");
    assert_eq!(nodes.len(), 6);
    assert_eq!(edges.len(), 9);
    assert_eq!(nodes[0]["id"], "N1");
    assert_eq!(nodes[0]["label"], "Person");
    assert!(nodes[0]["friendCount"].is_i64());
    assert_eq!(edges[0]["label"], "knows");
    assert!(edges[0]["source"].is_string() && edges[0]["target"].is_string());
}

#[rstest]
fn adjacency_formats_cover_every_edge(graph: PropertyGraph) {
    let adjacency = text(export(&graph, OutputFormat::AdjacencyList).expect("renders"));
    let listed: usize = adjacency
        .lines()
        .map(|line| line.split(' ').count() - 1)
        .sum();
    assert_eq!(listed, 9);
    assert_eq!(adjacency.lines().count(), 6);

    let edge_list = text(export(&graph, OutputFormat::EdgeList).expect("renders"));
    assert_eq!(edge_list.lines().count(), 9);

    let multiline = text(export(&graph, OutputFormat::MultilineAdjacencyList).expect("renders"));
    assert_eq!(multiline.lines().count(), 15);
}

#[rstest]
fn markup_formats_are_closed(graph: PropertyGraph) {
    let graphml = text(export(&graph, OutputFormat::GraphMl).expect("renders"));
    assert_eq!(graphml.matches("<node id=").count(), 6);
    assert_eq!(graphml.matches("<edge source=").count(), 9);

    let gexf = text(export(&graph, OutputFormat::Gexf).expect("renders"));
    assert!(gexf.contains("<attribute id=\"2\" title=\"friendCount\" type=\"long\" />"));
    assert!(gexf.ends_with("</gexf>"));

    let gml = text(export(&graph, OutputFormat::Gml).expect("renders"));
    assert_eq!(gml.matches("  node [").count(), 6);
    assert_eq!(gml.matches("  edge [").count(), 9);
}

#[rstest]
fn svg_honours_the_display_limit(graph: PropertyGraph) {
    let options = DrawOptions {
        limit: 3,
        show_info: true,
    };
    let svg = text(export_with(&graph, OutputFormat::Svg, &options).expect("svg renders"));
    assert_eq!(svg.matches("<circle").count(), 3);
    assert!(svg.contains("Showing 3 of 6 nodes"));

    let whole = text(export(&graph, OutputFormat::Svg).expect("svg renders"));
    assert_eq!(whole.matches("<circle").count(), 6);
    assert!(!whole.contains("Showing"));
}

#[rstest]
#[case::png(OutputFormat::Png, b"\x89PNG\r\n\x1a\n")]
#[case::jpg(OutputFormat::Jpg, b"\xFF\xD8\xFF")]
#[case::pdf(OutputFormat::Pdf, b"%PDF-")]
fn drawings_convert_to_binary_documents(
    graph: PropertyGraph,
    #[case] format: OutputFormat,
    #[case] magic: &[u8],
) {
    let payload = export(&graph, format).expect("drawing converts");
    assert_eq!(payload.as_text(), None);
    let bytes = payload.as_binary().expect("drawings are binary");
    assert!(bytes.starts_with(magic), "{format} starts with {:?}", bytes.get(..8));
}

#[rstest]
fn png_keeps_the_svg_canvas_size(graph: PropertyGraph) {
    let payload = export(&graph, OutputFormat::Png).expect("png renders");
    let bytes = payload.as_binary().expect("png is binary");
    let width = bytes
        .get(16..20)
        .and_then(|raw| <[u8; 4]>::try_from(raw).ok())
        .map(u32::from_be_bytes);
    assert_eq!(width, Some(800));
}

#[rstest]
fn rendering_is_instrumented(graph: PropertyGraph) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let options = DrawOptions {
        limit: 2,
        show_info: false,
    };

    tracing::subscriber::with_default(subscriber, || {
        export_with(&graph, OutputFormat::Svg, &options).expect("svg renders")
    });

    let span = layer.span("export.render").expect("export.render span must exist");
    assert_eq!(span.field("format"), Some("svg"));
    assert_eq!(span.field("nodes"), Some("6"));
    assert_eq!(span.field("edges"), Some("9"));
    assert!(
        layer
            .events_at(Level::WARN)
            .iter()
            .any(|event| event.field("message") == Some("display limit truncates the graph")
                && event.field("shown") == Some("2"))
    );
}
