//! Tests for loading schema documents from disk.

mod common;

use std::path::Path;

use knows_core::{SchemaError, SchemaErrorCode, TypeRegistry, load_schema};
use rstest::rstest;
use tracing_subscriber::layer::SubscriberExt;

use knows_test_support::tracing::RecordingLayer;

const VALID: &str = r#"{
    "nodeLabel": "Employee",
    "nodeProperties": {"name": "Name"},
    "edgeProperties": {"since": {"type": "Date", "symmetric": true}},
    "computedNodeProperties": {"connections": "degree"}
}"#;

#[rstest]
fn loads_a_valid_file() {
    let (_dir, path) = common::write_temp("schema.json", VALID);
    let schema = load_schema(&path, TypeRegistry::standard()).expect("schema must load");
    assert_eq!(schema.node_label(), "Employee");
    assert_eq!(schema.edge_label(), "edge");
    assert_eq!(schema.node_property_names().collect::<Vec<_>>(), ["name"]);
    assert_eq!(schema.symmetric_edge_properties().collect::<Vec<_>>(), ["since"]);
    assert_eq!(schema.computed_node_properties().len(), 1);
}

#[rstest]
fn extension_check_ignores_case() {
    let (_dir, path) = common::write_temp("SCHEMA.JSON", "{}");
    assert!(load_schema(&path, TypeRegistry::standard()).is_ok());
}

#[rstest]
fn missing_file_is_reported() {
    let err = load_schema(Path::new("/nonexistent/schema.json"), TypeRegistry::standard())
        .expect_err("missing files are rejected");
    assert_eq!(err.code(), SchemaErrorCode::NotFound);
    assert!(err.to_string().starts_with("Schema file not found"));
}

#[rstest]
#[case::yaml("schema.yaml")]
#[case::no_extension("schema")]
fn non_json_extension_is_rejected(#[case] name: &str) {
    let (_dir, path) = common::write_temp(name, "{}");
    let err = load_schema(&path, TypeRegistry::standard()).expect_err("extension is rejected");
    assert!(matches!(err, SchemaError::NotJson { .. }));
    assert!(err.to_string().contains("must be JSON format"));
}

#[rstest]
fn directories_fail_to_read() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join("nested.json");
    std::fs::create_dir(&path).expect("create directory");
    let err = load_schema(&path, TypeRegistry::standard()).expect_err("directories are rejected");
    assert_eq!(err.code(), SchemaErrorCode::Read);
}

#[rstest]
#[case::invalid_json("{not json", SchemaErrorCode::InvalidJson)]
#[case::not_object("[1, 2]", SchemaErrorCode::NotAnObject)]
#[case::unknown_type(r#"{"nodeProperties": {"field": "UnknownType"}}"#, SchemaErrorCode::UnknownType)]
fn content_errors_surface_from_files(#[case] contents: &str, #[case] code: SchemaErrorCode) {
    let (_dir, path) = common::write_temp("schema.json", contents);
    let err = load_schema(&path, TypeRegistry::standard()).expect_err("content is rejected");
    assert_eq!(err.code(), code);
}

#[rstest]
fn loading_is_instrumented() {
    let (_dir, path) = common::write_temp("schema.json", VALID);
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        load_schema(&path, TypeRegistry::standard()).expect("schema must load")
    });

    let span = layer.span("core.load_schema").expect("span must exist");
    assert_eq!(span.field("path"), Some(path.display().to_string().as_str()));
    assert!(layer.has_event("schema loaded"));
}
