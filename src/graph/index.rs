//! NameIndex: person names and movie keys to node ids.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::NodeId;
use crate::{Error, Result};
use super::MovieGraph;

/// Bijection between index keys and node ids.
///
/// Person keys are names (`"Tom Hanks"`), movie keys are title + year
/// (`"Avatar2009"`). Both directions are stored so removal by node id stays
/// O(1) when filters drop nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameIndex {
    by_key: HashMap<String, NodeId>,
    by_node: HashMap<NodeId, String>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the index for an arbitrary graph (e.g. a null graph).
    pub fn from_graph(graph: &MovieGraph) -> Result<Self> {
        let mut index = Self::new();
        for node in graph.nodes() {
            index.insert(node.index_key(), node.id)?;
        }
        Ok(index)
    }

    /// Insert a fresh key. Reusing a key or a node id breaks the bijection.
    pub fn insert(&mut self, key: impl Into<String>, id: NodeId) -> Result<()> {
        let key = key.into();
        if let Some(existing) = self.by_key.get(&key) {
            return Err(Error::InconsistentIndex(format!(
                "key {key:?} already maps to node {existing}"
            )));
        }
        if let Some(existing) = self.by_node.get(&id) {
            return Err(Error::InconsistentIndex(format!(
                "node {id} already indexed as {existing:?}"
            )));
        }
        self.by_node.insert(id, key.clone());
        self.by_key.insert(key, id);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<NodeId> {
        self.by_key.get(key).copied()
    }

    /// Lookup that treats a miss as a broken lockstep invariant.
    pub fn require(&self, key: &str) -> Result<NodeId> {
        self.get(key)
            .ok_or_else(|| Error::InconsistentIndex(format!("no node indexed under {key:?}")))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Remove the entry for a node. Returns its key.
    pub fn remove_node(&mut self, id: NodeId) -> Option<String> {
        let key = self.by_node.remove(&id)?;
        self.by_key.remove(&key);
        Some(key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.by_key.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Check that every indexed key names an existing node whose own key
    /// matches, and that every node is indexed.
    pub fn verify(&self, graph: &MovieGraph) -> Result<()> {
        if self.len() != graph.node_count() {
            return Err(Error::InconsistentIndex(format!(
                "index has {} entries for {} nodes",
                self.len(),
                graph.node_count()
            )));
        }
        for (key, id) in self.iter() {
            let node = graph.node(id).ok_or_else(|| {
                Error::InconsistentIndex(format!("{key:?} points at missing node {id}"))
            })?;
            if node.index_key() != key {
                return Err(Error::InconsistentIndex(format!(
                    "{key:?} points at node {id} keyed {:?}",
                    node.index_key()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut idx = NameIndex::new();
        idx.insert("Tom Hanks", NodeId(1)).unwrap();
        assert!(matches!(idx.insert("Tom Hanks", NodeId(2)), Err(Error::InconsistentIndex(_))));
        assert!(matches!(idx.insert("Meg Ryan", NodeId(1)), Err(Error::InconsistentIndex(_))));
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn test_remove_node_keeps_both_directions_in_sync() {
        let mut idx = NameIndex::new();
        idx.insert("Avatar2009", NodeId(0)).unwrap();
        assert_eq!(idx.remove_node(NodeId(0)).as_deref(), Some("Avatar2009"));
        assert!(idx.get("Avatar2009").is_none());
        assert!(idx.remove_node(NodeId(0)).is_none());
        assert_eq!(idx.len(), 0);
    }

    #[test]
    fn test_from_graph_and_verify() {
        let mut g = MovieGraph::new();
        g.add_node(NodeAttributes::Movie(MovieAttributes::new("Avatar", 2009)));
        g.add_node(NodeAttributes::Person(PersonAttributes::new(
            "James Cameron",
            Role::Director,
            Demographics::UNKNOWN,
        )));
        let idx = NameIndex::from_graph(&g).unwrap();
        assert_eq!(idx.get("Avatar2009"), Some(NodeId(0)));
        assert_eq!(idx.require("James Cameron").unwrap(), NodeId(1));
        assert!(idx.verify(&g).is_ok());

        g.remove_node(NodeId(1));
        assert!(idx.verify(&g).is_err());
    }
}
