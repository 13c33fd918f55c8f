//! Selection of the nodes shown in a drawing.

use std::{
    borrow::Cow,
    cmp::Reverse,
    collections::{HashSet, VecDeque},
};

use knows_core::PropertyGraph;
use tracing::{instrument, warn};

/// A graph prepared for drawing, possibly cut down to a display limit.
#[derive(Clone, Debug)]
pub struct LimitedGraph<'a> {
    graph: Cow<'a, PropertyGraph>,
    original_nodes: usize,
}

impl<'a> LimitedGraph<'a> {
    fn whole(graph: &'a PropertyGraph) -> Self {
        Self {
            original_nodes: graph.node_count(),
            graph: Cow::Borrowed(graph),
        }
    }

    /// The graph to draw.
    #[must_use]
    pub fn graph(&self) -> &PropertyGraph {
        &self.graph
    }

    /// Whether nodes were dropped to honour the limit.
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.shown_nodes() < self.original_nodes
    }

    /// Node count of the graph before limiting.
    #[must_use]
    pub const fn original_nodes(&self) -> usize {
        self.original_nodes
    }

    /// Node count of the graph to draw.
    #[must_use]
    pub fn shown_nodes(&self) -> usize {
        self.graph.node_count()
    }

    /// `Showing X of Y nodes` when the view is truncated.
    #[must_use]
    pub fn caption(&self) -> Option<String> {
        self.truncated().then(|| {
            format!(
                "Showing {} of {} nodes",
                self.shown_nodes(),
                self.original_nodes
            )
        })
    }
}

/// Restricts `graph` to at most `limit` nodes for drawing.
///
/// A `limit` of zero, or one at least the node count, keeps the whole
/// graph. Otherwise nodes are taken breadth-first over the undirected view,
/// starting from the highest-degree node not yet visited (ties resolved by
/// creation order) and restarting the same way whenever a component runs
/// out, until `limit` nodes are selected. The result is the subgraph
/// induced by the selection.
///
/// # Examples
/// ```
/// use knows_core::GraphGenerator;
/// use knows_export::limit_graph;
///
/// let graph = GraphGenerator::builder(10, 12).with_seed(1).build()?.generate();
/// let limited = limit_graph(&graph, 4);
/// assert!(limited.truncated());
/// assert_eq!(limited.shown_nodes(), 4);
/// assert_eq!(limited.caption().as_deref(), Some("Showing 4 of 10 nodes"));
/// # Ok::<(), knows_core::GenerationError>(())
/// ```
#[instrument(name = "export.limit", skip(graph), fields(nodes = graph.node_count()))]
pub fn limit_graph(graph: &PropertyGraph, limit: usize) -> LimitedGraph<'_> {
    let total = graph.node_count();
    if limit == 0 || limit >= total {
        return LimitedGraph::whole(graph);
    }

    let selected = select_nodes(graph, limit);
    warn!(shown = selected.len(), total, "display limit truncates the graph");
    LimitedGraph {
        graph: Cow::Owned(graph.induced_subgraph(&selected)),
        original_nodes: total,
    }
}

fn select_nodes(graph: &PropertyGraph, limit: usize) -> Vec<&str> {
    let mut seeds: Vec<(usize, &str)> = graph
        .nodes()
        .map(|node| (graph.undirected_degree(node.id()), node.id()))
        .collect();
    // Stable, so equal degrees keep creation order.
    seeds.sort_by_key(|(degree, _)| Reverse(*degree));

    let mut visited = HashSet::with_capacity(limit);
    let mut selected = Vec::with_capacity(limit);
    for (_, seed) in seeds {
        if !visited.insert(seed) {
            continue;
        }
        let mut queue = VecDeque::from([seed]);
        while let Some(current) = queue.pop_front() {
            selected.push(current);
            if selected.len() == limit {
                return selected;
            }
            for next in graph.undirected_neighbours(current) {
                if visited.insert(next.id()) {
                    queue.push_back(next.id());
                }
            }
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use knows_core::{Edge, PropertyMap};
    use rstest::{fixture, rstest};

    /// Star N1..N4 centred on N2 plus the pair N5 -> N6.
    #[fixture]
    fn star_and_pair() -> PropertyGraph {
        let mut graph = PropertyGraph::new();
        for id in ["N1", "N2", "N3", "N4", "N5", "N6"] {
            graph.add_node(id, "Person", PropertyMap::new()).expect("fresh node");
        }
        for (source, target) in [("N1", "N2"), ("N3", "N2"), ("N2", "N4"), ("N5", "N6")] {
            graph
                .add_edge(source, target, Edge::new("knows", PropertyMap::new()))
                .expect("valid edge");
        }
        graph
    }

    fn ids(limited: &LimitedGraph<'_>) -> Vec<String> {
        limited.graph().nodes().map(|node| node.id().to_owned()).collect()
    }

    #[rstest]
    #[case::unlimited(0)]
    #[case::exact(6)]
    #[case::generous(100)]
    fn keeps_whole_graph(star_and_pair: PropertyGraph, #[case] limit: usize) {
        let limited = limit_graph(&star_and_pair, limit);
        assert!(!limited.truncated());
        assert_eq!(limited.shown_nodes(), 6);
        assert_eq!(limited.caption(), None);
        assert!(matches!(limited.graph, Cow::Borrowed(_)));
    }

    #[rstest]
    fn starts_from_the_hub(star_and_pair: PropertyGraph) {
        let limited = limit_graph(&star_and_pair, 2);
        assert_eq!(ids(&limited), ["N1", "N2"]);
        assert_eq!(limited.graph().edge_count(), 1);
    }

    #[rstest]
    fn restarts_in_the_next_component(star_and_pair: PropertyGraph) {
        let limited = limit_graph(&star_and_pair, 5);
        assert_eq!(ids(&limited), ["N1", "N2", "N3", "N4", "N5"]);
        assert_eq!(limited.graph().edge_count(), 3);
        assert_eq!(limited.caption().as_deref(), Some("Showing 5 of 6 nodes"));
    }

    #[rstest]
    fn ties_break_by_creation_order() {
        let mut graph = PropertyGraph::new();
        for id in ["N1", "N2", "N3", "N4"] {
            graph.add_node(id, "Person", PropertyMap::new()).expect("fresh node");
        }
        for (source, target) in [("N3", "N4"), ("N1", "N2")] {
            graph
                .add_edge(source, target, Edge::new("knows", PropertyMap::new()))
                .expect("valid edge");
        }
        assert_eq!(ids(&limit_graph(&graph, 1)), ["N1"]);
    }
}
