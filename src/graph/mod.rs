//! # Movie Graph Storage
//!
//! The directed tripartite graph every stage reads and writes, plus the
//! derived shapes the analyses need.
//!
//! | Type | Module | Description |
//! |------|--------|-------------|
//! | `MovieGraph` | here | DIRECTOR→MOVIE→ACTOR directed multigraph |
//! | `NameIndex` | `index` | name / movie key ↔ node id bijection |
//! | `CoGraph`, `WeightedGraph` | `cooccurrence` | actor co-appearance projections |
//! | `BipartiteGraph` | `bipartite` | 2-colored undirected multigraph |
//!
//! ## Limitations
//!
//! - **Single-threaded**: there is no interior locking. Filters copy, the
//!   builder and time-series engine own the graph they grow.
//! - **No property indexes**: lookups by name go through `NameIndex`.

pub mod index;
pub mod cooccurrence;
pub mod bipartite;

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::model::*;
use crate::{Error, Result};

pub use index::NameIndex;
pub use cooccurrence::{CoGraph, WeightedGraph, actor_co_graph};
pub use bipartite::{BipartiteGraph, Side};

// ============================================================================
// MovieGraph
// ============================================================================

/// In-memory directed movie graph.
///
/// Nodes and edges live in ordered maps so iteration order (and therefore any
/// seeded randomization downstream) is reproducible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieGraph {
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<EdgeId, Edge>,
    /// node_id → incident edge ids, split by direction
    adjacency: HashMap<NodeId, Adjacency>,
    next_node_id: u64,
    next_edge_id: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Adjacency {
    outgoing: SmallVec<[EdgeId; 4]>,
    incoming: SmallVec<[EdgeId; 4]>,
}

impl MovieGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Node CRUD
    // ========================================================================

    /// Add a node under the next free id.
    pub fn add_node(&mut self, attributes: NodeAttributes) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.insert(id, Node::new(id, attributes));
        self.adjacency.insert(id, Adjacency::default());
        id
    }

    /// Insert a node under its own id, as taken from another graph.
    pub fn insert_node(&mut self, node: Node) -> Result<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(Error::SchemaViolation(format!("Node {} already present", node.id)));
        }
        self.next_node_id = self.next_node_id.max(node.id.0 + 1);
        self.adjacency.insert(node.id, Adjacency::default());
        self.nodes.insert(node.id, node);
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn movie(&self, id: NodeId) -> Option<&MovieAttributes> {
        self.node(id).and_then(Node::as_movie)
    }

    pub fn person(&self, id: NodeId) -> Option<&PersonAttributes> {
        self.node(id).and_then(Node::as_person)
    }

    pub fn person_mut(&mut self, id: NodeId) -> Option<&mut PersonAttributes> {
        self.node_mut(id).and_then(Node::as_person_mut)
    }

    /// Remove a node together with every edge touching it.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let adj = self.adjacency.remove(&id)?;
        for eid in adj.outgoing.iter().chain(adj.incoming.iter()) {
            if let Some(edge) = self.edges.remove(eid) {
                let other = edge.other_node(id).unwrap_or(edge.dst);
                if let Some(other_adj) = self.adjacency.get_mut(&other) {
                    other_adj.outgoing.retain(|e| *e != *eid);
                    other_adj.incoming.retain(|e| *e != *eid);
                }
            }
        }
        self.nodes.remove(&id)
    }

    // ========================================================================
    // Edge CRUD
    // ========================================================================

    /// Add a directed edge. Endpoints must exist and match the edge kind.
    pub fn add_edge(&mut self, src: NodeId, dst: NodeId, kind: EdgeKind) -> Result<EdgeId> {
        let src_kind = self.node(src)
            .ok_or_else(|| Error::NotFound(format!("Source node {src}")))?
            .kind();
        let dst_kind = self.node(dst)
            .ok_or_else(|| Error::NotFound(format!("Target node {dst}")))?
            .kind();

        let valid = match kind {
            EdgeKind::Directs => src_kind != NodeKind::Movie && dst_kind == NodeKind::Movie,
            EdgeKind::Casts => src_kind == NodeKind::Movie && dst_kind != NodeKind::Movie,
        };
        if !valid {
            return Err(Error::SchemaViolation(format!(
                "{kind:?} edge cannot connect {src_kind} {src} to {dst_kind} {dst}"
            )));
        }

        let id = EdgeId(self.next_edge_id);
        self.next_edge_id += 1;
        self.edges.insert(id, Edge::new(id, src, dst, kind));
        self.adjacency.entry(src).or_default().outgoing.push(id);
        self.adjacency.entry(dst).or_default().incoming.push(id);
        Ok(id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.edges.remove(&id)?;
        if let Some(adj) = self.adjacency.get_mut(&edge.src) {
            adj.outgoing.retain(|e| *e != id);
        }
        if let Some(adj) = self.adjacency.get_mut(&edge.dst) {
            adj.incoming.retain(|e| *e != id);
        }
        Some(edge)
    }

    /// Drop every edge for which `keep` returns false. Returns how many went.
    pub fn retain_edges(&mut self, mut keep: impl FnMut(&Edge) -> bool) -> usize {
        let doomed: Vec<EdgeId> = self.edges.values()
            .filter(|e| !keep(e))
            .map(|e| e.id)
            .collect();
        for id in &doomed {
            self.remove_edge(*id);
        }
        doomed.len()
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Edges incident to `node`, filtered by direction and kind.
    pub fn edges_of(&self, node: NodeId, dir: Direction, kind: Option<EdgeKind>) -> Vec<&Edge> {
        let Some(adj) = self.adjacency.get(&node) else {
            return Vec::new();
        };
        let none: &[EdgeId] = &[];
        let (out, inc) = match dir {
            Direction::Outgoing => (adj.outgoing.as_slice(), none),
            Direction::Incoming => (none, adj.incoming.as_slice()),
            Direction::Both => (adj.outgoing.as_slice(), adj.incoming.as_slice()),
        };
        out.iter()
            .chain(inc.iter())
            .filter_map(|id| self.edges.get(id))
            .filter(|e| kind.is_none_or(|k| e.kind == k))
            .collect()
    }

    pub fn out_degree(&self, node: NodeId, kind: EdgeKind) -> usize {
        self.edges_of(node, Direction::Outgoing, Some(kind)).len()
    }

    pub fn in_degree(&self, node: NodeId, kind: EdgeKind) -> usize {
        self.edges_of(node, Direction::Incoming, Some(kind)).len()
    }

    /// Total number of incident edges of any kind.
    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency.get(&node).map_or(0, |a| a.outgoing.len() + a.incoming.len())
    }

    /// The credited director of a movie.
    pub fn director_of(&self, movie: NodeId) -> Option<NodeId> {
        self.edges_of(movie, Direction::Incoming, Some(EdgeKind::Directs))
            .first()
            .map(|e| e.src)
    }

    /// Cast members of a movie, one entry per cast edge.
    pub fn cast_of(&self, movie: NodeId) -> Vec<NodeId> {
        self.edges_of(movie, Direction::Outgoing, Some(EdgeKind::Casts))
            .iter()
            .map(|e| e.dst)
            .collect()
    }

    /// Movies a person directed.
    pub fn movies_directed_by(&self, person: NodeId) -> Vec<NodeId> {
        self.edges_of(person, Direction::Outgoing, Some(EdgeKind::Directs))
            .iter()
            .map(|e| e.dst)
            .collect()
    }

    /// Movies a person acted in.
    pub fn appearances_of(&self, person: NodeId) -> Vec<NodeId> {
        self.edges_of(person, Direction::Incoming, Some(EdgeKind::Casts))
            .iter()
            .map(|e| e.src)
            .collect()
    }

    // ========================================================================
    // Scan
    // ========================================================================

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    /// Ids of every node whose kind satisfies `pred`, ascending.
    pub fn ids_where(&self, pred: impl Fn(NodeKind) -> bool) -> Vec<NodeId> {
        self.nodes.values().filter(|n| pred(n.kind())).map(|n| n.id).collect()
    }

    pub fn movies(&self) -> Vec<NodeId> {
        self.ids_where(|k| k == NodeKind::Movie)
    }

    /// Actors and actor-directors.
    pub fn actors(&self) -> Vec<NodeId> {
        self.ids_where(NodeKind::acts)
    }

    /// Directors and actor-directors.
    pub fn directors(&self) -> Vec<NodeId> {
        self.ids_where(NodeKind::directs)
    }

    pub fn people(&self) -> Vec<NodeId> {
        self.ids_where(|k| k != NodeKind::Movie)
    }

    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes.values().filter(|n| n.kind() == kind).count()
    }

    pub fn count_edges(&self, kind: EdgeKind) -> usize {
        self.edges.values().filter(|e| e.kind == kind).count()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
