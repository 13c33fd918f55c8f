use rstest::rstest;

use super::*;
use crate::{
    error::SchemaErrorCode,
    registry::{Bound, FakeKind},
};

fn parse(text: &str) -> Result<Schema, SchemaError> {
    Schema::from_json_str(text, TypeRegistry::standard())
}

#[rstest]
fn empty_object_uses_schema_defaults() {
    let schema = parse("{}").expect("empty schema is valid");
    assert_eq!(schema.node_label(), "Node");
    assert_eq!(schema.edge_label(), "edge");
    assert!(schema.node_properties().is_empty());
    assert!(schema.edge_properties().is_empty());
    assert!(schema.computed_node_properties().is_empty());
}

#[rstest]
fn keeps_document_order_and_resolves_generators() {
    let schema = parse(
        r#"{
            "nodeLabel": "Employee",
            "edgeLabel": "worksWith",
            "nodeProperties": {
                "zeta": "Email",
                "alpha": {"type": "Int", "min": 1, "max": 3},
                "team": {"enum": ["red", 2, true, 1.5]}
            },
            "edgeProperties": {
                "since": {"type": "DATE", "min": "2010-01-01", "symmetric": true},
                "weight": "Float"
            }
        }"#,
    )
    .expect("schema is valid");

    assert_eq!(schema.node_label(), "Employee");
    assert_eq!(schema.edge_label(), "worksWith");
    assert_eq!(
        schema.node_property_names().collect::<Vec<_>>(),
        ["zeta", "alpha", "team"]
    );
    assert_eq!(
        schema.edge_property_names().collect::<Vec<_>>(),
        ["since", "weight"]
    );

    let [zeta, alpha, team] = schema.node_properties() else {
        panic!("three node properties expected");
    };
    assert_eq!(zeta.generator(), &ValueGenerator::Fake(FakeKind::Email));
    assert_eq!(alpha.generator(), &ValueGenerator::Integer { min: 1, max: 3 });
    assert_eq!(
        alpha.definition(),
        &PropertyDefinition::Typed {
            type_name: "Int".to_owned(),
            constraints: Constraints::range(1_i64, 3_i64),
            symmetric: false,
        }
    );
    assert_eq!(
        team.definition(),
        &PropertyDefinition::Enum {
            values: vec![
                PropertyValue::from("red"),
                PropertyValue::Int(2),
                PropertyValue::Bool(true),
                PropertyValue::Float(1.5),
            ],
            symmetric: false,
        }
    );
}

#[rstest]
fn symmetric_view_lists_only_flagged_objects() {
    let schema = parse(
        r#"{"edgeProperties": {
            "city": {"type": "City", "symmetric": true},
            "strength": {"type": "Int", "symmetric": false},
            "bare": "Date",
            "mood": {"enum": ["calm", "tense"], "symmetric": true}
        }}"#,
    )
    .expect("schema is valid");
    assert_eq!(
        schema.symmetric_edge_properties().collect::<Vec<_>>(),
        ["city", "mood"]
    );
}

#[rstest]
fn computed_properties_are_kept_in_order() {
    let schema = parse(r#"{"computedNodeProperties": {"connections": "degree", "links": "degree"}}"#)
        .expect("schema is valid");
    let computed: Vec<_> = schema
        .computed_node_properties()
        .iter()
        .map(|property| (property.name(), property.kind()))
        .collect();
    assert_eq!(
        computed,
        [("connections", ComputedKind::Degree), ("links", ComputedKind::Degree)]
    );
}

#[rstest]
fn date_bounds_are_kept_as_text() {
    let schema = parse(r#"{"nodeProperties": {"born": {"type": "Date", "max": "2000-01-01"}}}"#)
        .expect("schema is valid");
    let [born] = schema.node_properties() else {
        panic!("one property expected");
    };
    let PropertyDefinition::Typed { constraints, .. } = born.definition() else {
        panic!("typed definition expected");
    };
    assert_eq!(constraints.max, Some(Bound::Text("2000-01-01".to_owned())));
}

#[rstest]
#[case::not_json("{nope", SchemaErrorCode::InvalidJson, "Invalid JSON")]
#[case::array("[]", SchemaErrorCode::NotAnObject, "must be a JSON object")]
#[case::empty_label(r#"{"nodeLabel": ""}"#, SchemaErrorCode::EmptyLabel, "nodeLabel cannot be empty")]
#[case::numeric_label(r#"{"edgeLabel": 5}"#, SchemaErrorCode::WrongType, "edgeLabel must be a string")]
#[case::section_type(
    r#"{"nodeProperties": []}"#,
    SchemaErrorCode::WrongType,
    "nodeProperties must be an object"
)]
#[case::unknown_top_level(r#"{"nodes": {}}"#, SchemaErrorCode::UnknownKey, "at 'nodes'")]
#[case::unknown_type(
    r#"{"nodeProperties": {"field": "UnknownType"}}"#,
    SchemaErrorCode::UnknownType,
    "Unknown type 'UnknownType' for property 'nodeProperties.field'"
)]
#[case::missing_type(
    r#"{"nodeProperties": {"field": {"min": 1}}}"#,
    SchemaErrorCode::MissingTypeOrEnum,
    "must have 'type' or 'enum' field"
)]
#[case::empty_enum(
    r#"{"nodeProperties": {"field": {"enum": []}}}"#,
    SchemaErrorCode::EmptyEnum,
    "enum must be a non-empty array"
)]
#[case::enum_not_array(
    r#"{"nodeProperties": {"field": {"enum": "red"}}}"#,
    SchemaErrorCode::EmptyEnum,
    "enum must be a non-empty array"
)]
#[case::nested_enum(
    r#"{"nodeProperties": {"field": {"enum": [[1]]}}}"#,
    SchemaErrorCode::InvalidDefinition,
    "enum values"
)]
#[case::numeric_definition(
    r#"{"nodeProperties": {"field": 3}}"#,
    SchemaErrorCode::InvalidDefinition,
    "nodeProperties.field"
)]
#[case::type_and_enum(
    r#"{"nodeProperties": {"field": {"type": "Int", "enum": [1]}}}"#,
    SchemaErrorCode::InvalidDefinition,
    "cannot be combined"
)]
#[case::unknown_definition_key(
    r#"{"edgeProperties": {"field": {"type": "Int", "step": 2}}}"#,
    SchemaErrorCode::UnknownKey,
    "edgeProperties.field.step"
)]
#[case::symmetric_not_bool(
    r#"{"edgeProperties": {"field": {"type": "Int", "symmetric": "yes"}}}"#,
    SchemaErrorCode::WrongType,
    "edgeProperties.field.symmetric must be a boolean"
)]
#[case::bad_constraint(
    r#"{"nodeProperties": {"age": {"type": "Int", "min": 10, "max": 1}}}"#,
    SchemaErrorCode::InvalidConstraint,
    "nodeProperties.age"
)]
#[case::negative_precision(
    r#"{"nodeProperties": {"score": {"type": "Float", "precision": -1}}}"#,
    SchemaErrorCode::WrongType,
    "precision must be a non-negative integer"
)]
#[case::computed_not_string(
    r#"{"computedNodeProperties": {"count": 1}}"#,
    SchemaErrorCode::ComputedNotString,
    "must be a string type"
)]
#[case::unknown_computed(
    r#"{"computedNodeProperties": {"count": "pagerank"}}"#,
    SchemaErrorCode::UnknownComputed,
    "Unknown computed property type 'pagerank'"
)]
fn rejects_invalid_documents(
    #[case] text: &str,
    #[case] code: SchemaErrorCode,
    #[case] fragment: &str,
) {
    let err = parse(text).expect_err("document must be rejected");
    assert_eq!(err.code(), code, "{err}");
    assert!(err.to_string().contains(fragment), "{err}");
}

#[rstest]
fn reports_the_first_error_in_document_order() {
    let err = parse(
        r#"{
            "nodeProperties": {"first": "Bogus"},
            "edgeLabel": ""
        }"#,
    )
    .expect_err("document must be rejected");
    assert_eq!(err.code(), SchemaErrorCode::UnknownType);
}
