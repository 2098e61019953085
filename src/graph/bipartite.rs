//! Two-colored undirected multigraph, the output shape of the configuration
//! model before it is oriented back into a `MovieGraph`.

use serde::{Deserialize, Serialize};

use crate::model::NodeAttributes;
use crate::{Error, Result};

/// Which color class a bipartite node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Zero,
    One,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BipartiteNode {
    pub side: Side,
    /// Real entity metadata, attached after generation.
    pub attributes: Option<NodeAttributes>,
}

/// Nodes are addressed by position. Side-zero nodes come first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BipartiteGraph {
    nodes: Vec<BipartiteNode>,
    edges: Vec<(usize, usize)>,
}

impl BipartiteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, side: Side) -> usize {
        self.nodes.push(BipartiteNode { side, attributes: None });
        self.nodes.len() - 1
    }

    /// Add an undirected edge. Both ends must exist and sit on opposite sides.
    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<()> {
        let (sa, sb) = match (self.nodes.get(a), self.nodes.get(b)) {
            (Some(na), Some(nb)) => (na.side, nb.side),
            _ => return Err(Error::NotFound(format!("bipartite node {a} or {b}"))),
        };
        if sa == sb {
            return Err(Error::InvalidBipartition(format!(
                "edge {a}-{b} joins two {sa:?} nodes"
            )));
        }
        self.edges.push((a, b));
        Ok(())
    }

    pub fn attach(&mut self, node: usize, attributes: NodeAttributes) -> Result<()> {
        let slot = self.nodes.get_mut(node)
            .ok_or_else(|| Error::NotFound(format!("bipartite node {node}")))?;
        slot.attributes = Some(attributes);
        Ok(())
    }

    pub fn node(&self, idx: usize) -> Option<&BipartiteNode> {
        self.nodes.get(idx)
    }

    pub fn nodes(&self) -> &[BipartiteNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Positions of the nodes on one side, ascending.
    pub fn side(&self, side: Side) -> Vec<usize> {
        self.nodes.iter()
            .enumerate()
            .filter(|(_, n)| n.side == side)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn degree(&self, idx: usize) -> usize {
        self.edges.iter().filter(|(a, b)| *a == idx || *b == idx).count()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
