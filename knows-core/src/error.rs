//! Error types for the knows core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias for generation.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

use crate::catalogue::PropertyTarget;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while resolving a type name against the
/// [`crate::TypeRegistry`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RegistryError {
    /// The type name is not canonical and has no alias.
    #[error("Unknown type '{name}'. Available types: {available}")]
    UnknownType {
        /// Type name as supplied by the caller.
        name: String,
        /// Comma-separated list of the canonical type names.
        available: String,
    },
    /// A constraint could not be applied to the resolved type.
    #[error("invalid constraint for type '{type_name}': {message}")]
    InvalidConstraint {
        /// Canonical name of the type the constraint targeted.
        type_name: &'static str,
        /// Human-readable description of the problem.
        message: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`RegistryError`] variants.
    enum RegistryErrorCode for RegistryError {
        /// The type name is not canonical and has no alias.
        UnknownType => UnknownType { .. } => "REGISTRY_UNKNOWN_TYPE",
        /// A constraint could not be applied to the resolved type.
        InvalidConstraint => InvalidConstraint { .. } => "REGISTRY_INVALID_CONSTRAINT",
    }
}

/// An error produced while loading or validating a schema document.
///
/// Messages name the offending field path, for example
/// `nodeProperties.salary`, so they can be shown to users verbatim.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema path does not exist.
    #[error("Schema file not found: {}", path.display())]
    NotFound {
        /// Path supplied by the caller.
        path: PathBuf,
    },
    /// The schema path does not carry a `.json` extension.
    #[error("Schema file must be JSON format: {}", path.display())]
    NotJson {
        /// Path supplied by the caller.
        path: PathBuf,
    },
    /// Reading the schema file failed.
    #[error("failed to read schema file `{}`: {source}", path.display())]
    Read {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The schema content is not valid JSON.
    #[error("Invalid JSON in schema file: {source}")]
    InvalidJson {
        /// Parser failure reported by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The top-level JSON value is not an object.
    #[error("Schema must be a JSON object")]
    NotAnObject,
    /// A field holds a JSON value of the wrong kind.
    #[error("{field} must be {expected}")]
    WrongType {
        /// Path of the offending field.
        field: String,
        /// Description of the expected kind, including its article.
        expected: &'static str,
    },
    /// A label field is an empty string.
    #[error("{field} cannot be empty")]
    EmptyLabel {
        /// Name of the label field.
        field: &'static str,
    },
    /// A key is not part of the schema vocabulary.
    #[error("Unknown property in schema at '{path}'")]
    UnknownKey {
        /// Dotted path of the unexpected key.
        path: String,
    },
    /// A property definition object has neither `type` nor `enum`.
    #[error("Property '{property}' must have 'type' or 'enum' field")]
    MissingTypeOrEnum {
        /// Dotted path of the property.
        property: String,
    },
    /// A property definition has an unsupported shape.
    #[error("Invalid definition for property '{property}': {message}")]
    InvalidDefinition {
        /// Dotted path of the property.
        property: String,
        /// Human-readable description of the problem.
        message: &'static str,
    },
    /// An `enum` definition lists no values.
    #[error("Property '{property}' enum must be a non-empty array")]
    EmptyEnum {
        /// Dotted path of the property.
        property: String,
    },
    /// A property names a type the registry does not know.
    #[error("Unknown type '{name}' for property '{property}'. Available types: {available}")]
    UnknownType {
        /// Dotted path of the property.
        property: String,
        /// Type name as written in the schema.
        name: String,
        /// Comma-separated list of the canonical type names.
        available: String,
    },
    /// A property constraint does not fit its type.
    #[error("Invalid constraint for property '{property}': {message}")]
    InvalidConstraint {
        /// Dotted path of the property.
        property: String,
        /// Human-readable description of the problem.
        message: String,
    },
    /// A computed property kind is not a string.
    #[error("Computed property '{property}' must be a string type")]
    ComputedNotString {
        /// Dotted path of the computed property.
        property: String,
    },
    /// A computed property kind is not supported.
    #[error("Unknown computed property type '{kind}' for '{property}'. Available types: {available}")]
    UnknownComputed {
        /// Dotted path of the computed property.
        property: String,
        /// Kind as written in the schema.
        kind: String,
        /// Comma-separated list of supported kinds.
        available: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`SchemaError`] variants.
    enum SchemaErrorCode for SchemaError {
        /// The schema path does not exist.
        NotFound => NotFound { .. } => "SCHEMA_NOT_FOUND",
        /// The schema path does not carry a `.json` extension.
        NotJson => NotJson { .. } => "SCHEMA_NOT_JSON",
        /// Reading the schema file failed.
        Read => Read { .. } => "SCHEMA_READ_FAILED",
        /// The schema content is not valid JSON.
        InvalidJson => InvalidJson { .. } => "SCHEMA_INVALID_JSON",
        /// The top-level JSON value is not an object.
        NotAnObject => NotAnObject => "SCHEMA_NOT_OBJECT",
        /// A field holds a JSON value of the wrong kind.
        WrongType => WrongType { .. } => "SCHEMA_WRONG_TYPE",
        /// A label field is an empty string.
        EmptyLabel => EmptyLabel { .. } => "SCHEMA_EMPTY_LABEL",
        /// A key is not part of the schema vocabulary.
        UnknownKey => UnknownKey { .. } => "SCHEMA_UNKNOWN_KEY",
        /// A property definition object has neither `type` nor `enum`.
        MissingTypeOrEnum => MissingTypeOrEnum { .. } => "SCHEMA_MISSING_TYPE_OR_ENUM",
        /// A property definition has an unsupported shape.
        InvalidDefinition => InvalidDefinition { .. } => "SCHEMA_INVALID_DEFINITION",
        /// An `enum` definition lists no values.
        EmptyEnum => EmptyEnum { .. } => "SCHEMA_EMPTY_ENUM",
        /// A property names a type the registry does not know.
        UnknownType => UnknownType { .. } => "SCHEMA_UNKNOWN_TYPE",
        /// A property constraint does not fit its type.
        InvalidConstraint => InvalidConstraint { .. } => "SCHEMA_INVALID_CONSTRAINT",
        /// A computed property kind is not a string.
        ComputedNotString => ComputedNotString { .. } => "SCHEMA_COMPUTED_NOT_STRING",
        /// A computed property kind is not supported.
        UnknownComputed => UnknownComputed { .. } => "SCHEMA_UNKNOWN_COMPUTED",
    }
}

impl SchemaError {
    /// Attach a property path to a [`RegistryError`] raised while resolving
    /// that property's definition.
    pub(crate) fn from_registry(property: &str, error: RegistryError) -> Self {
        match error {
            RegistryError::UnknownType { name, available } => Self::UnknownType {
                property: property.to_owned(),
                name,
                available,
            },
            RegistryError::InvalidConstraint { message, .. } => Self::InvalidConstraint {
                property: property.to_owned(),
                message,
            },
        }
    }
}

/// Why a node/edge count pair cannot produce a simple directed graph.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParameterIssue {
    /// The graph needs at least two nodes.
    TooFewNodes,
    /// More edges were requested than distinct ordered node pairs exist.
    TooManyEdges {
        /// Largest edge count the node count supports.
        max_edges: usize,
    },
}

impl fmt::Display for ParameterIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewNodes => f.write_str("number of nodes must be greater than 1"),
            Self::TooManyEdges { max_edges } => {
                write!(f, "number of edges must be between 0 and {max_edges}")
            }
        }
    }
}

/// Error type produced when configuring a [`crate::GraphGenerator`].
///
/// Every variant is raised before any node is created or any random value is
/// drawn, so a failed build never leaves a partial graph behind.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GenerationError {
    /// The node/edge counts cannot describe a simple directed graph.
    #[error("invalid graph parameters (nodes: {num_nodes}, edges: {num_edges}): {issue}")]
    InvalidParameters {
        /// Node count supplied by the caller.
        num_nodes: usize,
        /// Edge count supplied by the caller.
        num_edges: usize,
        /// Which structural bound was violated.
        issue: ParameterIssue,
    },
    /// A requested property is not part of the built-in catalogue.
    #[error("Unknown {target} property: {name}")]
    UnknownProperty {
        /// Whether the property was requested for nodes or edges.
        target: PropertyTarget,
        /// Property name as supplied by the caller.
        name: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`GenerationError`] variants.
    enum GenerationErrorCode for GenerationError {
        /// The node/edge counts cannot describe a simple directed graph.
        InvalidParameters => InvalidParameters { .. } => "KNOWS_INVALID_PARAMETERS",
        /// A requested property is not part of the built-in catalogue.
        UnknownProperty => UnknownProperty { .. } => "KNOWS_UNKNOWN_PROPERTY",
    }
}

/// An error produced when mutating a [`crate::PropertyGraph`] directly.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// A node with the same identifier already exists.
    #[error("node `{id}` already exists")]
    DuplicateNode {
        /// Identifier of the existing node.
        id: String,
    },
    /// An edge endpoint does not exist.
    #[error("node `{id}` does not exist")]
    UnknownNode {
        /// Identifier that could not be resolved.
        id: String,
    },
    /// Both endpoints of an edge are the same node.
    #[error("self-loop on node `{id}` is not allowed")]
    SelfLoop {
        /// Identifier of the node.
        id: String,
    },
    /// An edge already connects the ordered pair.
    #[error("edge `{source_id}` -> `{target_id}` already exists")]
    DuplicateEdge {
        /// Source node identifier.
        source_id: String,
        /// Target node identifier.
        target_id: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// A node with the same identifier already exists.
        DuplicateNode => DuplicateNode { .. } => "GRAPH_DUPLICATE_NODE",
        /// An edge endpoint does not exist.
        UnknownNode => UnknownNode { .. } => "GRAPH_UNKNOWN_NODE",
        /// Both endpoints of an edge are the same node.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// An edge already connects the ordered pair.
        DuplicateEdge => DuplicateEdge { .. } => "GRAPH_DUPLICATE_EDGE",
    }
}

/// Convenient alias for results returned by the generation API.
pub type Result<T> = core::result::Result<T, GenerationError>;
