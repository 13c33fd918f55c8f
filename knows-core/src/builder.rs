//! Builder utilities for configuring graph generation.
//!
//! Collects node/edge counts, property selection, an optional schema and an
//! optional seed, and validates them before a [`GraphGenerator`] exists.

use tracing::instrument;

use crate::{
    Result,
    catalogue::{DEFAULT_EDGE_PROPERTIES, DEFAULT_NODE_PROPERTIES, PropertyTarget},
    error::{GenerationError, ParameterIssue},
    generator::{GenerationPlan, GraphGenerator},
    schema::Schema,
};

/// Largest edge count a simple digraph on `num_nodes` nodes can hold, or
/// `None` when the bound does not fit in `usize`.
///
/// # Examples
/// ```
/// use knows_core::max_edges;
///
/// assert_eq!(max_edges(4), Some(12));
/// assert_eq!(max_edges(1), Some(0));
/// ```
#[must_use]
pub const fn max_edges(num_nodes: usize) -> Option<usize> {
    num_nodes.checked_mul(num_nodes.saturating_sub(1))
}

/// Configures and constructs [`GraphGenerator`] instances.
///
/// # Examples
/// ```
/// use knows_core::GraphGenerator;
///
/// let generator = GraphGenerator::builder(10, 20)
///     .with_node_properties(["firstName", "company"])
///     .with_edge_properties(["meetingCount"])
///     .with_seed(42)
///     .build()
///     .expect("configuration is valid");
/// let graph = generator.generate();
/// assert_eq!(graph.node_count(), 10);
/// assert_eq!(graph.edge_count(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct GraphGeneratorBuilder {
    num_nodes: usize,
    num_edges: usize,
    node_properties: Option<Vec<String>>,
    edge_properties: Option<Vec<String>>,
    schema: Option<Schema>,
    seed: Option<u64>,
}

impl GraphGeneratorBuilder {
    /// Creates a builder for a graph with the given element counts.
    #[must_use]
    pub const fn new(num_nodes: usize, num_edges: usize) -> Self {
        Self {
            num_nodes,
            num_edges,
            node_properties: None,
            edge_properties: None,
            schema: None,
            seed: None,
        }
    }

    /// Selects built-in node properties. An empty list disables them.
    ///
    /// Ignored when a schema is supplied.
    #[must_use]
    pub fn with_node_properties<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.node_properties = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Selects built-in edge properties. An empty list disables them.
    ///
    /// Ignored when a schema is supplied.
    #[must_use]
    pub fn with_edge_properties<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.edge_properties = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Uses `schema` for labels, properties and computed properties.
    #[must_use]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Makes generation reproducible.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the requested node count.
    #[must_use]
    pub const fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the requested edge count.
    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns the configured seed.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration and constructs a [`GraphGenerator`].
    ///
    /// # Errors
    /// Returns [`GenerationError::InvalidParameters`] when fewer than two
    /// nodes are requested or the edge count exceeds `n * (n - 1)`, and
    /// [`GenerationError::UnknownProperty`] when a requested property is not
    /// in the built-in catalogue (node properties are checked first).
    #[instrument(
        name = "core.build",
        err,
        skip(self),
        fields(
            nodes = self.num_nodes,
            edges = self.num_edges,
            schema = self.schema.is_some(),
        ),
    )]
    pub fn build(self) -> Result<GraphGenerator> {
        validate_counts(self.num_nodes, self.num_edges)?;
        let plan = match self.schema {
            Some(schema) => GenerationPlan::from_schema(schema),
            None => GenerationPlan::builtin(
                self.node_properties
                    .unwrap_or_else(|| defaults(&DEFAULT_NODE_PROPERTIES)),
                self.edge_properties
                    .unwrap_or_else(|| defaults(&DEFAULT_EDGE_PROPERTIES)),
            )?,
        };
        Ok(GraphGenerator::new(
            self.num_nodes,
            self.num_edges,
            self.seed,
            plan,
        ))
    }
}

fn defaults(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

fn validate_counts(num_nodes: usize, num_edges: usize) -> Result<()> {
    let issue = if num_nodes <= 1 {
        Some(ParameterIssue::TooFewNodes)
    } else {
        max_edges(num_nodes)
            .filter(|max| num_edges > *max)
            .map(|max| ParameterIssue::TooManyEdges { max_edges: max })
    };
    issue.map_or(Ok(()), |found| {
        Err(GenerationError::InvalidParameters {
            num_nodes,
            num_edges,
            issue: found,
        })
    })
}

pub(crate) fn unknown_property(target: PropertyTarget, name: String) -> GenerationError {
    GenerationError::UnknownProperty { target, name }
}
