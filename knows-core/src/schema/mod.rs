//! Declarative schema documents.
//!
//! A schema is a JSON object overriding the built-in labels and property
//! catalogue:
//!
//! ```json
//! {
//!   "nodeLabel": "Employee",
//!   "edgeLabel": "worksWith",
//!   "nodeProperties": {
//!     "name": "Name",
//!     "salary": { "type": "Int", "min": 30000, "max": 90000 },
//!     "team": { "enum": ["red", "blue"] }
//!   },
//!   "edgeProperties": {
//!     "since": { "type": "Date", "min": "2010-01-01", "symmetric": true }
//!   },
//!   "computedNodeProperties": { "connections": "degree" }
//! }
//! ```
//!
//! Every definition is resolved against a [`TypeRegistry`] while loading, so
//! invalid types and constraints surface as [`SchemaError`]s before any graph
//! is generated.

mod parse;

use std::{
    ffi::OsStr,
    fmt,
    path::Path,
    str::FromStr,
};

use tracing::instrument;

use crate::{
    error::SchemaError,
    registry::{Constraints, TypeRegistry, ValueGenerator},
    value::PropertyValue,
};

/// Node label used when a schema omits `nodeLabel`.
pub const SCHEMA_DEFAULT_NODE_LABEL: &str = "Node";
/// Edge label used when a schema omits `edgeLabel`.
pub const SCHEMA_DEFAULT_EDGE_LABEL: &str = "edge";

/// How a schema property is described.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyDefinition {
    /// A bare type name such as `"Email"`.
    TypeName(String),
    /// An object with `type` and optional constraints.
    Typed {
        /// Type name as written.
        type_name: String,
        /// Optional bounds and limits.
        constraints: Constraints,
        /// Whether reciprocal edges share the value.
        symmetric: bool,
    },
    /// An object with an `enum` of literal choices.
    Enum {
        /// Non-empty list of scalar values.
        values: Vec<PropertyValue>,
        /// Whether reciprocal edges share the value.
        symmetric: bool,
    },
}

impl PropertyDefinition {
    /// Returns whether the definition opts into symmetric propagation.
    ///
    /// Bare type names are never symmetric.
    #[must_use]
    pub const fn is_symmetric(&self) -> bool {
        match self {
            Self::TypeName(_) => false,
            Self::Typed { symmetric, .. } | Self::Enum { symmetric, .. } => *symmetric,
        }
    }
}

/// A named schema property together with its resolved generator.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaProperty {
    name: String,
    definition: PropertyDefinition,
    generator: ValueGenerator,
}

impl SchemaProperty {
    /// Property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Definition as written in the document.
    #[must_use]
    pub const fn definition(&self) -> &PropertyDefinition {
        &self.definition
    }

    /// Generator resolved while loading.
    #[must_use]
    pub const fn generator(&self) -> &ValueGenerator {
        &self.generator
    }
}

/// Supported computed node property kinds.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ComputedKind {
    /// Number of distinct neighbours ignoring direction.
    Degree,
}

impl ComputedKind {
    /// Every supported kind.
    pub const ALL: [Self; 1] = [Self::Degree];

    /// Schema spelling of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Degree => "degree",
        }
    }
}

impl fmt::Display for ComputedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComputedKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| value.to_owned())
    }
}

/// A node property filled in after all edges exist.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComputedProperty {
    name: String,
    kind: ComputedKind,
}

impl ComputedProperty {
    /// Property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Computation to run.
    #[must_use]
    pub const fn kind(&self) -> ComputedKind {
        self.kind
    }
}

/// A validated, immutable schema.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    node_label: String,
    edge_label: String,
    node_properties: Vec<SchemaProperty>,
    edge_properties: Vec<SchemaProperty>,
    computed_node_properties: Vec<ComputedProperty>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            node_label: SCHEMA_DEFAULT_NODE_LABEL.to_owned(),
            edge_label: SCHEMA_DEFAULT_EDGE_LABEL.to_owned(),
            node_properties: Vec::new(),
            edge_properties: Vec::new(),
            computed_node_properties: Vec::new(),
        }
    }
}

impl Schema {
    /// Parses and validates a schema from JSON text.
    ///
    /// # Errors
    /// Returns the first [`SchemaError`] found, in document order.
    pub fn from_json_str(text: &str, registry: &TypeRegistry) -> Result<Self, SchemaError> {
        let document: serde_json::Value =
            serde_json::from_str(text).map_err(|source| SchemaError::InvalidJson { source })?;
        parse::parse_document(&document, registry)
    }

    /// Label applied to every node.
    #[must_use]
    pub fn node_label(&self) -> &str {
        &self.node_label
    }

    /// Label applied to every edge.
    #[must_use]
    pub fn edge_label(&self) -> &str {
        &self.edge_label
    }

    /// Node properties in document order.
    #[must_use]
    pub fn node_properties(&self) -> &[SchemaProperty] {
        &self.node_properties
    }

    /// Edge properties in document order.
    #[must_use]
    pub fn edge_properties(&self) -> &[SchemaProperty] {
        &self.edge_properties
    }

    /// Computed node properties in document order.
    #[must_use]
    pub fn computed_node_properties(&self) -> &[ComputedProperty] {
        &self.computed_node_properties
    }

    /// Names of node properties in document order.
    pub fn node_property_names(&self) -> impl Iterator<Item = &str> {
        self.node_properties.iter().map(SchemaProperty::name)
    }

    /// Names of edge properties in document order.
    pub fn edge_property_names(&self) -> impl Iterator<Item = &str> {
        self.edge_properties.iter().map(SchemaProperty::name)
    }

    /// Names of edge properties declared `symmetric: true`.
    pub fn symmetric_edge_properties(&self) -> impl Iterator<Item = &str> {
        self.edge_properties
            .iter()
            .filter(|property| property.definition.is_symmetric())
            .map(SchemaProperty::name)
    }
}

/// Loads and validates a schema file.
///
/// # Errors
/// Returns [`SchemaError::NotFound`] for missing paths,
/// [`SchemaError::NotJson`] when the extension is not `.json`,
/// [`SchemaError::Read`] when the file cannot be read, and any validation
/// error raised by [`Schema::from_json_str`].
#[instrument(name = "core.load_schema", err, skip(registry), fields(path = %path.display()))]
pub fn load_schema(path: &Path, registry: &TypeRegistry) -> Result<Schema, SchemaError> {
    if !path.exists() {
        return Err(SchemaError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let is_json = path
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(SchemaError::NotJson {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let schema = Schema::from_json_str(&text, registry)?;
    tracing::debug!(
        node_properties = schema.node_properties.len(),
        edge_properties = schema.edge_properties.len(),
        computed = schema.computed_node_properties.len(),
        "schema loaded"
    );
    Ok(schema)
}

#[cfg(test)]
mod tests;
