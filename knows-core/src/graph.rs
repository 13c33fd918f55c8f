//! In-memory property graph.
//!
//! A thin layer over [`petgraph::graph::DiGraph`] that keeps node
//! identifiers, labels and property maps, and enforces the simple-digraph
//! invariants: unique node ids, no self-loops and at most one edge per
//! ordered pair.

use std::collections::{BTreeSet, HashMap, HashSet};

use petgraph::{
    Direction,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef as _,
};

use crate::{
    error::GraphError,
    value::{PropertyMap, PropertyValue},
};

/// A labelled node with properties.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    id: String,
    label: String,
    properties: PropertyMap,
}

impl Node {
    /// Identifier, unique within the graph.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Node label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Properties in generation order.
    #[must_use]
    pub const fn properties(&self) -> &PropertyMap {
        &self.properties
    }
}

/// Label and properties carried by an edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    label: String,
    properties: PropertyMap,
}

impl Edge {
    /// Creates an edge payload.
    #[must_use]
    pub fn new(label: impl Into<String>, properties: PropertyMap) -> Self {
        Self {
            label: label.into(),
            properties,
        }
    }

    /// Edge label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Properties in generation order.
    #[must_use]
    pub const fn properties(&self) -> &PropertyMap {
        &self.properties
    }
}

/// Borrowed view of one edge with both endpoints resolved.
#[derive(Clone, Copy, Debug)]
pub struct EdgeRef<'a> {
    /// Tail of the edge.
    pub source: &'a Node,
    /// Head of the edge.
    pub target: &'a Node,
    /// Label and properties.
    pub edge: &'a Edge,
}

/// A simple directed property graph.
#[derive(Clone, Debug, Default)]
pub struct PropertyGraph {
    inner: DiGraph<Node, Edge>,
    index: HashMap<String, NodeIndex>,
}

impl PropertyGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for the given element counts.
    #[must_use]
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            inner: DiGraph::with_capacity(nodes, edges),
            index: HashMap::with_capacity(nodes),
        }
    }

    /// Adds a node.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateNode`] when `id` is already present.
    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        properties: PropertyMap,
    ) -> Result<(), GraphError> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(GraphError::DuplicateNode { id });
        }
        let position = self.inner.add_node(Node {
            id: id.clone(),
            label: label.into(),
            properties,
        });
        self.index.insert(id, position);
        Ok(())
    }

    /// Adds an edge between two existing nodes.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] for missing endpoints,
    /// [`GraphError::SelfLoop`] when both endpoints match and
    /// [`GraphError::DuplicateEdge`] when the ordered pair is taken.
    pub fn add_edge(&mut self, source: &str, target: &str, edge: Edge) -> Result<(), GraphError> {
        let from = self.position(source)?;
        let to = self.position(target)?;
        if from == to {
            return Err(GraphError::SelfLoop {
                id: source.to_owned(),
            });
        }
        if self.inner.contains_edge(from, to) {
            return Err(GraphError::DuplicateEdge {
                source_id: source.to_owned(),
                target_id: target.to_owned(),
            });
        }
        self.inner.add_edge(from, to, edge);
        Ok(())
    }

    fn position(&self, id: &str) -> Result<NodeIndex, GraphError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode { id: id.to_owned() })
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Returns whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> {
        self.inner.raw_nodes().iter().map(|node| &node.weight)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>> {
        self.inner.edge_references().filter_map(|edge| {
            Some(EdgeRef {
                source: self.inner.node_weight(edge.source())?,
                target: self.inner.node_weight(edge.target())?,
                edge: edge.weight(),
            })
        })
    }

    /// Looks up a node by identifier.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        let position = self.index.get(id)?;
        self.inner.node_weight(*position)
    }

    /// Looks up the edge `source -> target`.
    #[must_use]
    pub fn edge(&self, source: &str, target: &str) -> Option<&Edge> {
        let from = self.index.get(source)?;
        let to = self.index.get(target)?;
        self.edge_at(from.index(), to.index())
    }

    /// Returns whether the edge `source -> target` exists.
    #[must_use]
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edge(source, target).is_some()
    }

    /// Successors of `id` in edge insertion order.
    #[must_use]
    pub fn out_neighbours(&self, id: &str) -> Vec<&Node> {
        let Some(position) = self.index.get(id) else {
            return Vec::new();
        };
        let mut outgoing: Vec<(EdgeIndex, NodeIndex)> = self
            .inner
            .edges_directed(*position, Direction::Outgoing)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        outgoing.sort_unstable_by_key(|(edge, _)| *edge);
        outgoing
            .into_iter()
            .filter_map(|(_, target)| self.inner.node_weight(target))
            .collect()
    }

    /// Distinct neighbours of `id` ignoring direction, in creation order.
    #[must_use]
    pub fn undirected_neighbours(&self, id: &str) -> Vec<&Node> {
        self.index.get(id).map_or_else(Vec::new, |position| {
            self.neighbour_positions(*position)
                .into_iter()
                .filter_map(|neighbour| self.inner.node_weight(neighbour))
                .collect()
        })
    }

    /// Number of distinct neighbours of `id` ignoring direction.
    #[must_use]
    pub fn undirected_degree(&self, id: &str) -> usize {
        self.index
            .get(id)
            .map_or(0, |position| self.neighbour_positions(*position).len())
    }

    fn neighbour_positions(&self, position: NodeIndex) -> BTreeSet<NodeIndex> {
        self.inner.neighbors_undirected(position).collect()
    }

    /// Subgraph holding the listed nodes and every edge between them.
    ///
    /// Nodes keep their original relative order; unknown ids are skipped.
    #[must_use]
    pub fn induced_subgraph(&self, ids: &[&str]) -> Self {
        let keep: HashSet<&str> = ids.iter().copied().collect();
        let mut subgraph = Self::with_capacity(keep.len(), 0);
        for node in self.nodes().filter(|node| keep.contains(node.id())) {
            let position = subgraph.inner.add_node(node.clone());
            subgraph.index.insert(node.id.clone(), position);
        }
        for edge in self.edges() {
            if let (Some(from), Some(to)) = (
                subgraph.index.get(edge.source.id()),
                subgraph.index.get(edge.target.id()),
            ) {
                subgraph.inner.add_edge(*from, *to, edge.edge.clone());
            }
        }
        subgraph
    }

    /// Appends a node whose id is known to be fresh.
    pub(crate) fn push_node(&mut self, id: String, label: &str, properties: PropertyMap) {
        let position = self.inner.add_node(Node {
            id: id.clone(),
            label: label.to_owned(),
            properties,
        });
        self.index.insert(id, position);
    }

    pub(crate) fn edge_at(&self, source: usize, target: usize) -> Option<&Edge> {
        let edge = self
            .inner
            .find_edge(NodeIndex::new(source), NodeIndex::new(target))?;
        self.inner.edge_weight(edge)
    }

    pub(crate) fn contains_edge_at(&self, source: usize, target: usize) -> bool {
        self.inner
            .contains_edge(NodeIndex::new(source), NodeIndex::new(target))
    }

    /// Inserts an edge by node position; callers uphold the invariants.
    pub(crate) fn insert_edge_at(&mut self, source: usize, target: usize, edge: Edge) {
        self.inner
            .add_edge(NodeIndex::new(source), NodeIndex::new(target), edge);
    }

    pub(crate) fn undirected_degree_at(&self, position: usize) -> usize {
        self.neighbour_positions(NodeIndex::new(position)).len()
    }

    pub(crate) fn set_node_property_at(
        &mut self,
        position: usize,
        name: &str,
        value: PropertyValue,
    ) {
        if let Some(node) = self.inner.node_weight_mut(NodeIndex::new(position)) {
            node.properties.insert(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::error::GraphErrorCode;

    fn edge() -> Edge {
        Edge::new("knows", PropertyMap::new())
    }

    #[fixture]
    fn triangle() -> PropertyGraph {
        let mut graph = PropertyGraph::new();
        for id in ["A", "B", "C", "D"] {
            graph
                .add_node(id, "Person", PropertyMap::new())
                .expect("ids are unique");
        }
        for (source, target) in [("A", "B"), ("B", "A"), ("C", "A"), ("A", "D")] {
            graph.add_edge(source, target, edge()).expect("edge is new");
        }
        graph
    }

    #[rstest]
    fn counts_distinct_undirected_neighbours(triangle: PropertyGraph) {
        assert_eq!(triangle.undirected_degree("A"), 3);
        assert_eq!(triangle.undirected_degree("B"), 1);
        assert_eq!(triangle.undirected_degree("missing"), 0);
        let neighbours: Vec<_> = triangle
            .undirected_neighbours("A")
            .into_iter()
            .map(Node::id)
            .collect();
        assert_eq!(neighbours, ["B", "C", "D"]);
    }

    #[rstest]
    fn nodes_iterate_in_creation_order_with_exact_length(triangle: PropertyGraph) {
        let nodes = triangle.nodes();
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes.map(Node::id).collect::<Vec<_>>(), ["A", "B", "C", "D"]);
    }

    #[rstest]
    fn out_neighbours_follow_insertion_order(triangle: PropertyGraph) {
        let successors: Vec<_> = triangle
            .out_neighbours("A")
            .into_iter()
            .map(Node::id)
            .collect();
        assert_eq!(successors, ["B", "D"]);
    }

    #[rstest]
    fn edges_iterate_in_insertion_order(triangle: PropertyGraph) {
        let pairs: Vec<_> = triangle
            .edges()
            .map(|edge| (edge.source.id(), edge.target.id()))
            .collect();
        assert_eq!(pairs, [("A", "B"), ("B", "A"), ("C", "A"), ("A", "D")]);
    }

    #[rstest]
    #[case::duplicate_edge("A", "B", GraphErrorCode::DuplicateEdge)]
    #[case::self_loop("C", "C", GraphErrorCode::SelfLoop)]
    #[case::unknown("A", "Z", GraphErrorCode::UnknownNode)]
    fn rejects_invalid_edges(
        mut triangle: PropertyGraph,
        #[case] source: &str,
        #[case] target: &str,
        #[case] code: GraphErrorCode,
    ) {
        let err = triangle
            .add_edge(source, target, edge())
            .expect_err("edge must be rejected");
        assert_eq!(err.code(), code);
        assert_eq!(triangle.edge_count(), 4);
    }

    #[rstest]
    fn rejects_duplicate_nodes(mut triangle: PropertyGraph) {
        let err = triangle
            .add_node("A", "Person", PropertyMap::new())
            .expect_err("id is taken");
        assert_eq!(err.code(), GraphErrorCode::DuplicateNode);
    }

    #[rstest]
    fn induced_subgraph_keeps_internal_edges(triangle: PropertyGraph) {
        let subgraph = triangle.induced_subgraph(&["B", "A"]);
        assert_eq!(
            subgraph.nodes().map(Node::id).collect::<Vec<_>>(),
            ["A", "B"]
        );
        assert_eq!(subgraph.edge_count(), 2);
        assert!(subgraph.has_edge("B", "A"));
        assert!(!subgraph.has_edge("A", "D"));
    }
}
