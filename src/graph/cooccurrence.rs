//! Actor co-appearance projections of the movie graph.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{NodeId, PersonAttributes};
use super::MovieGraph;

/// Undirected co-appearance multigraph: one edge per cast pair per movie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoGraph {
    nodes: BTreeMap<NodeId, PersonAttributes>,
    /// Endpoints stored as (smaller, larger).
    edges: Vec<(NodeId, NodeId)>,
}

impl CoGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: NodeId, attrs: PersonAttributes) {
        self.nodes.entry(id).or_insert(attrs);
    }

    /// Add one co-appearance. Self pairs are ignored.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) {
        if a != b {
            self.edges.push((a.min(b), a.max(b)));
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&PersonAttributes> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &PersonAttributes)> {
        self.nodes.iter().map(|(id, p)| (*id, p))
    }

    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of parallel edges between two actors.
    pub fn multiplicity(&self, a: NodeId, b: NodeId) -> usize {
        let key = (a.min(b), a.max(b));
        self.edges.iter().filter(|e| **e == key).count()
    }

    /// Collapse parallel edges into a simple graph weighted by multiplicity.
    pub fn collapse(&self) -> WeightedGraph {
        let mut weighted = WeightedGraph {
            nodes: self.nodes.clone(),
            weights: BTreeMap::new(),
        };
        for &(a, b) in &self.edges {
            *weighted.weights.entry(a).or_default().entry(b).or_insert(0.0) += 1.0;
        }
        weighted
    }
}

/// Simple undirected graph with edge weights = number of shared movies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightedGraph {
    nodes: BTreeMap<NodeId, PersonAttributes>,
    /// smaller endpoint -> larger endpoint -> weight
    weights: BTreeMap<NodeId, BTreeMap<NodeId, f64>>,
}

impl WeightedGraph {
    pub fn node(&self, id: NodeId) -> Option<&PersonAttributes> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &PersonAttributes)> {
        self.nodes.iter().map(|(id, p)| (*id, p))
    }

    pub fn weight(&self, a: NodeId, b: NodeId) -> f64 {
        self.weights
            .get(&a.min(b))
            .and_then(|row| row.get(&a.max(b)))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> {
        self.weights
            .iter()
            .flat_map(|(&a, row)| row.iter().map(move |(&b, &w)| (a, b, w)))
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.values().flat_map(BTreeMap::values).sum()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.weights.values().map(BTreeMap::len).sum()
    }

    /// Induced subgraph on the nodes `keep` accepts.
    pub fn retain_nodes(&self, keep: impl Fn(&PersonAttributes) -> bool) -> WeightedGraph {
        let nodes: BTreeMap<NodeId, PersonAttributes> = self.nodes.iter()
            .filter(|(_, p)| keep(p))
            .map(|(id, p)| (*id, p.clone()))
            .collect();
        let weights = self.weights.iter()
            .filter(|(a, _)| nodes.contains_key(*a))
            .map(|(a, row)| {
                let row: BTreeMap<NodeId, f64> = row.iter()
                    .filter(|(b, _)| nodes.contains_key(*b))
                    .map(|(b, w)| (*b, *w))
                    .collect();
                (*a, row)
            })
            .filter(|(_, row)| !row.is_empty())
            .collect();
        WeightedGraph { nodes, weights }
    }
}

/// Project the movie graph onto actors: every pair of cast members of the
/// same movie gets one co-appearance edge.
pub fn actor_co_graph(graph: &MovieGraph) -> CoGraph {
    let mut co = CoGraph::new();
    for movie in graph.movies() {
        let cast = graph.cast_of(movie);
        for &id in &cast {
            if let Some(p) = graph.person(id) {
                co.add_node(id, p.clone());
            }
        }
        for (i, &a) in cast.iter().enumerate() {
            for &b in &cast[i + 1..] {
                co.add_edge(a, b);
            }
        }
    }
    co
}
