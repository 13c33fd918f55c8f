//! Graph generation.
//!
//! Provides [`GraphGenerator`], which turns a validated configuration into a
//! [`PropertyGraph`] in one pass: nodes, then edges by rejection sampling,
//! then computed node properties.

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::{
    Result,
    builder::{GraphGeneratorBuilder, unknown_property},
    catalogue::{
        DEFAULT_EDGE_LABEL, DEFAULT_NODE_LABEL, PropertyTarget, builtin_generator,
        is_symmetric_builtin,
    },
    graph::{Edge, PropertyGraph},
    random::RandomStreams,
    registry::ValueGenerator,
    schema::{ComputedKind, ComputedProperty, Schema, SchemaProperty},
    value::{PropertyMap, PropertyValue},
};

#[derive(Clone, Debug)]
struct PropertyPlan {
    name: String,
    generator: ValueGenerator,
    symmetric: bool,
}

impl PropertyPlan {
    fn from_schema(property: &SchemaProperty) -> Self {
        Self {
            name: property.name().to_owned(),
            generator: property.generator().clone(),
            symmetric: property.definition().is_symmetric(),
        }
    }
}

/// Resolved labels and property generators for one generator.
#[derive(Clone, Debug)]
pub(crate) struct GenerationPlan {
    node_label: String,
    edge_label: String,
    node_properties: Vec<PropertyPlan>,
    edge_properties: Vec<PropertyPlan>,
    computed: Vec<ComputedProperty>,
}

impl GenerationPlan {
    pub(crate) fn from_schema(schema: Schema) -> Self {
        Self {
            node_label: schema.node_label().to_owned(),
            edge_label: schema.edge_label().to_owned(),
            node_properties: schema
                .node_properties()
                .iter()
                .map(PropertyPlan::from_schema)
                .collect(),
            edge_properties: schema
                .edge_properties()
                .iter()
                .map(PropertyPlan::from_schema)
                .collect(),
            computed: schema.computed_node_properties().to_vec(),
        }
    }

    pub(crate) fn builtin(node: Vec<String>, edge: Vec<String>) -> Result<Self> {
        Ok(Self {
            node_label: DEFAULT_NODE_LABEL.to_owned(),
            edge_label: DEFAULT_EDGE_LABEL.to_owned(),
            node_properties: builtin_plans(PropertyTarget::Node, node)?,
            edge_properties: builtin_plans(PropertyTarget::Edge, edge)?,
            computed: Vec::new(),
        })
    }
}

fn builtin_plans(target: PropertyTarget, names: Vec<String>) -> Result<Vec<PropertyPlan>> {
    let mut plans: Vec<PropertyPlan> = Vec::with_capacity(names.len());
    for name in names {
        if plans.iter().any(|plan| plan.name == name) {
            continue;
        }
        let Some(generator) = builtin_generator(target, &name) else {
            return Err(unknown_property(target, name));
        };
        let symmetric = target == PropertyTarget::Edge && is_symmetric_builtin(&name);
        plans.push(PropertyPlan {
            name,
            generator,
            symmetric,
        });
    }
    Ok(plans)
}

/// Generates property graphs from a validated configuration.
///
/// # Examples
/// ```
/// use knows_core::GraphGenerator;
///
/// let generator = GraphGenerator::builder(4, 12)
///     .with_seed(0)
///     .build()
///     .expect("a complete digraph on four nodes is valid");
/// let graph = generator.generate();
/// assert!(graph.nodes().all(|node| graph.undirected_degree(node.id()) == 3));
/// ```
#[derive(Clone, Debug)]
pub struct GraphGenerator {
    num_nodes: usize,
    num_edges: usize,
    seed: Option<u64>,
    plan: GenerationPlan,
}

impl GraphGenerator {
    pub(crate) const fn new(
        num_nodes: usize,
        num_edges: usize,
        seed: Option<u64>,
        plan: GenerationPlan,
    ) -> Self {
        Self {
            num_nodes,
            num_edges,
            seed,
            plan,
        }
    }

    /// Starts configuring a generator.
    #[must_use]
    pub const fn builder(num_nodes: usize, num_edges: usize) -> GraphGeneratorBuilder {
        GraphGeneratorBuilder::new(num_nodes, num_edges)
    }

    /// Number of nodes every generated graph has.
    #[must_use]
    pub const fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of edges every generated graph has.
    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Seed, if generation is reproducible.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Label applied to every node.
    #[must_use]
    pub fn node_label(&self) -> &str {
        &self.plan.node_label
    }

    /// Label applied to every edge.
    #[must_use]
    pub fn edge_label(&self) -> &str {
        &self.plan.edge_label
    }

    /// Node property names in generation order.
    pub fn node_property_names(&self) -> impl Iterator<Item = &str> {
        self.plan
            .node_properties
            .iter()
            .map(|plan| plan.name.as_str())
    }

    /// Edge property names in generation order.
    pub fn edge_property_names(&self) -> impl Iterator<Item = &str> {
        self.plan
            .edge_properties
            .iter()
            .map(|plan| plan.name.as_str())
    }

    /// Edge properties copied across reciprocal edges.
    pub fn symmetric_edge_properties(&self) -> impl Iterator<Item = &str> {
        self.plan
            .edge_properties
            .iter()
            .filter(|plan| plan.symmetric)
            .map(|plan| plan.name.as_str())
    }

    /// Computed node properties applied after edge generation.
    #[must_use]
    pub fn computed_node_properties(&self) -> &[ComputedProperty] {
        &self.plan.computed
    }

    /// Generates a graph, seeding fresh streams from the configured seed or
    /// from entropy.
    #[must_use]
    pub fn generate(&self) -> PropertyGraph {
        let mut streams = RandomStreams::new(self.seed);
        self.generate_with(&mut streams)
    }

    /// Generates a graph drawing from caller-owned streams.
    #[instrument(
        name = "core.generate",
        skip(self, streams),
        fields(nodes = self.num_nodes, edges = self.num_edges, seeded = self.seed.is_some()),
    )]
    pub fn generate_with(&self, streams: &mut RandomStreams) -> PropertyGraph {
        let mut graph = PropertyGraph::with_capacity(self.num_nodes, self.num_edges);
        self.add_nodes(&mut graph, streams.values());
        debug!(count = graph.node_count(), "nodes generated");

        let rejected_samples = self.add_edges(&mut graph, streams);
        debug!(count = graph.edge_count(), rejected_samples, "edges generated");

        apply_computed(&mut graph, &self.plan.computed);
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            rejected_samples,
            "graph generated"
        );
        graph
    }

    fn add_nodes<R: Rng + ?Sized>(&self, graph: &mut PropertyGraph, rng: &mut R) {
        for ordinal in 1..=self.num_nodes {
            let properties = generate_properties(&self.plan.node_properties, rng, |_| None);
            graph.push_node(format!("N{ordinal}"), &self.plan.node_label, properties);
        }
    }

    /// Adds edges until the target count is reached and returns how many
    /// sampled pairs were rejected as duplicates.
    fn add_edges(&self, graph: &mut PropertyGraph, streams: &mut RandomStreams) -> usize {
        let node_count = graph.node_count();
        let mut rejected = 0_usize;
        while graph.edge_count() < self.num_edges {
            let (source, target) = sample_pair(streams.structure(), node_count);
            if graph.contains_edge_at(source, target) {
                rejected += 1;
                continue;
            }
            let reciprocal = graph.edge_at(target, source).map(Edge::properties);
            let properties =
                generate_properties(&self.plan.edge_properties, streams.values(), |plan| {
                    plan.symmetric
                        .then(|| reciprocal.and_then(|map| map.get(&plan.name)).cloned())
                        .flatten()
                });
            graph.insert_edge_at(source, target, Edge::new(&self.plan.edge_label, properties));
        }
        rejected
    }
}

fn generate_properties<R, F>(plans: &[PropertyPlan], rng: &mut R, mut mirrored: F) -> PropertyMap
where
    R: Rng + ?Sized,
    F: FnMut(&PropertyPlan) -> Option<PropertyValue>,
{
    let mut properties = PropertyMap::with_capacity(plans.len());
    for plan in plans {
        let value = mirrored(plan).unwrap_or_else(|| plan.generator.generate(rng));
        properties.insert(plan.name.as_str(), value);
    }
    properties
}

/// Draws an ordered pair of distinct positions uniformly.
fn sample_pair<R: Rng + ?Sized>(rng: &mut R, node_count: usize) -> (usize, usize) {
    let source = rng.gen_range(0..node_count);
    let offset = rng.gen_range(0..node_count - 1);
    let target = if offset >= source { offset + 1 } else { offset };
    (source, target)
}

fn apply_computed(graph: &mut PropertyGraph, computed: &[ComputedProperty]) {
    if computed.is_empty() {
        return;
    }
    let degrees: Vec<usize> = (0..graph.node_count())
        .map(|position| graph.undirected_degree_at(position))
        .collect();
    for (position, degree) in degrees.into_iter().enumerate() {
        for property in computed {
            let value = match property.kind() {
                ComputedKind::Degree => PropertyValue::Int(i64::try_from(degree).unwrap_or(i64::MAX)),
            };
            graph.set_node_property_at(position, property.name(), value);
        }
    }
    debug!(properties = computed.len(), "computed properties applied");
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::pair(2)]
    #[case::small(5)]
    fn sampled_pairs_are_distinct_and_in_range(#[case] node_count: usize) {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..500 {
            let (source, target) = sample_pair(&mut rng, node_count);
            assert_ne!(source, target);
            assert!(source < node_count && target < node_count);
        }
    }

    #[rstest]
    fn sampling_reaches_every_ordered_pair() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2_000 {
            seen.insert(sample_pair(&mut rng, 4));
        }
        assert_eq!(seen.len(), 12);
    }

    #[rstest]
    fn duplicate_requests_collapse_to_first_occurrence() {
        let plans = builtin_plans(
            PropertyTarget::Node,
            vec!["lastName".into(), "firstName".into(), "lastName".into()],
        )
        .expect("names are in the catalogue");
        let names: Vec<_> = plans.iter().map(|plan| plan.name.as_str()).collect();
        assert_eq!(names, ["lastName", "firstName"]);
    }

    #[rstest]
    fn builtin_symmetry_only_applies_to_edges() {
        let plans = builtin_plans(
            PropertyTarget::Edge,
            vec!["strength".into(), "meetingCount".into()],
        )
        .expect("names are in the catalogue");
        let flags: Vec<_> = plans.iter().map(|plan| plan.symmetric).collect();
        assert_eq!(flags, [false, true]);
    }
}
