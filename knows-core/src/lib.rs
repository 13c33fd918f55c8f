//! Knows core library.
//!
//! Generates synthetic directed property graphs: `N` labelled nodes, `E`
//! labelled edges with no self-loops or parallel edges, and property values
//! drawn from a built-in catalogue or a declarative JSON schema.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod catalogue;
mod error;
mod generator;
mod graph;
mod random;
mod registry;
mod schema;
mod value;

pub use crate::{
    builder::{GraphGeneratorBuilder, max_edges},
    catalogue::{
        DEFAULT_EDGE_LABEL, DEFAULT_EDGE_PROPERTIES, DEFAULT_NODE_LABEL, DEFAULT_NODE_PROPERTIES,
        EDGE_PROPERTIES, NODE_PROPERTIES, PropertyTarget, SYMMETRIC_EDGE_PROPERTIES,
    },
    error::{
        GenerationError, GenerationErrorCode, GraphError, GraphErrorCode, ParameterIssue,
        RegistryError, RegistryErrorCode, Result, SchemaError, SchemaErrorCode,
    },
    generator::GraphGenerator,
    graph::{Edge, EdgeRef, Node, PropertyGraph},
    random::{RandomStreams, VALUE_STREAM_SALT},
    registry::{
        Bound, ChoiceSet, Constraints, FakeKind, PropertyType, TypeRegistry, ValueGenerator,
    },
    schema::{
        ComputedKind, ComputedProperty, PropertyDefinition, SCHEMA_DEFAULT_EDGE_LABEL,
        SCHEMA_DEFAULT_NODE_LABEL, Schema, SchemaProperty, load_schema,
    },
    value::{PropertyMap, PropertyValue, ValueKind},
};
