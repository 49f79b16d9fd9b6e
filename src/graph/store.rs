//! In-memory investigation graph storage
//!
//! The store owns every node and edge of one investigation. Artifact strings
//! are the natural key: `artifact_index` maps each artifact to its node and the
//! node records its artifact back, so the mapping is a bijection at all times.
//!
//! Mutations validate before they touch any map, so a failed call leaves the
//! store exactly as it was.

use super::artifact::ArtifactKind;
use super::edge::Edge;
use super::node::Node;
use super::snapshot::{EdgeView, GraphSnapshot, NodeView};
use super::types::{EdgeId, NodeId, Relationship};
use crate::config::GraphConfig;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Relationship label used when the caller does not supply one
pub const DEFAULT_RELATIONSHIP: &str = "connected";

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Artifact '{0}' already exists in the graph")]
    DuplicateArtifact(String),

    #[error("Artifact '{0}' does not exist in the graph")]
    UnknownArtifact(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Counts describing the current state of a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    /// Nodes per kind; kinds without nodes are absent
    pub kinds: BTreeMap<ArtifactKind, usize>,
}

/// In-memory graph storage
///
/// - nodes: NodeId -> Node (ordered, for stable enumeration)
/// - edges: EdgeId -> Edge (ordered by creation)
/// - adjacency: NodeId -> incident EdgeIds
/// - artifact_index: artifact -> NodeId, in insertion order
#[derive(Debug, Clone)]
pub struct GraphStore {
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<EdgeId, Edge>,
    adjacency: FxHashMap<NodeId, Vec<EdgeId>>,
    artifact_index: IndexMap<String, NodeId>,
    default_relationship: Relationship,
    next_node_id: u64,
    next_edge_id: u64,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::with_default_relationship(DEFAULT_RELATIONSHIP)
    }

    /// Create a store configured from [`GraphConfig`]
    pub fn with_config(config: &GraphConfig) -> Self {
        Self::with_default_relationship(config.default_relationship.as_str())
    }

    fn with_default_relationship(relationship: impl Into<Relationship>) -> Self {
        GraphStore {
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            adjacency: FxHashMap::default(),
            artifact_index: IndexMap::new(),
            default_relationship: relationship.into(),
            next_node_id: 1,
            next_edge_id: 1,
        }
    }

    /// Add an artifact as a new node.
    ///
    /// Fails with [`GraphError::DuplicateArtifact`] if the artifact is already
    /// present. Node IDs are never reused until [`GraphStore::clear`].
    pub fn add_node(&mut self, artifact: impl Into<String>) -> GraphResult<NodeId> {
        let artifact = artifact.into();
        if self.artifact_index.contains_key(&artifact) {
            return Err(GraphError::DuplicateArtifact(artifact));
        }

        let node_id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;

        let node = Node::new(node_id, artifact.clone());
        debug!("Added node {} -> {} ({})", node.artifact, node_id, node.kind);

        self.artifact_index.insert(artifact, node_id);
        self.adjacency.insert(node_id, Vec::new());
        self.nodes.insert(node_id, node);

        Ok(node_id)
    }

    /// Link two artifacts with a relationship label.
    ///
    /// Both endpoints must already be nodes. Self-loops and parallel edges are
    /// accepted.
    pub fn add_edge(
        &mut self,
        a: &str,
        b: &str,
        relationship: impl Into<Relationship>,
    ) -> GraphResult<EdgeId> {
        let node_a = self.require(a)?;
        let node_b = self.require(b)?;

        let edge_id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;

        let edge = Edge::new(edge_id, node_a, node_b, relationship);
        debug!("Added edge {} <-> {} ({})", a, b, edge.relationship);

        self.adjacency.entry(node_a).or_default().push(edge_id);
        if !edge.is_self_loop() {
            self.adjacency.entry(node_b).or_default().push(edge_id);
        }
        self.edges.insert(edge_id, edge);

        Ok(edge_id)
    }

    /// Link two artifacts using the store's default relationship label
    pub fn connect(&mut self, a: &str, b: &str) -> GraphResult<EdgeId> {
        let relationship = self.default_relationship.clone();
        self.add_edge(a, b, relationship)
    }

    /// Remove an artifact's node together with every edge incident to it
    pub fn remove_node(&mut self, artifact: &str) -> GraphResult<Node> {
        let node_id = self.require(artifact)?;

        self.artifact_index.shift_remove(artifact);
        let incident = self.adjacency.remove(&node_id).unwrap_or_default();

        for edge_id in incident {
            let Some(edge) = self.edges.remove(&edge_id) else {
                continue;
            };
            if edge.is_self_loop() {
                continue;
            }
            if let Some(list) = edge.other(node_id).and_then(|other| self.adjacency.get_mut(&other)) {
                list.retain(|id| *id != edge_id);
            }
        }

        let node = self
            .nodes
            .remove(&node_id)
            .ok_or_else(|| GraphError::UnknownArtifact(artifact.to_string()))?;
        debug!("Removed node {} ({})", artifact, node_id);

        Ok(node)
    }

    /// Reset to the empty graph. The NodeID counter restarts, so IDs are only
    /// unique within one epoch between clears.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.adjacency.clear();
        self.artifact_index.clear();
        self.next_node_id = 1;
        self.next_edge_id = 1;
        debug!("Cleared graph");
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All artifacts currently in the store, in insertion order
    pub fn all_artifacts(&self) -> Vec<&str> {
        self.artifact_index.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, artifact: &str) -> bool {
        self.artifact_index.contains_key(artifact)
    }

    pub fn node_id(&self, artifact: &str) -> Option<NodeId> {
        self.artifact_index.get(artifact).copied()
    }

    pub fn get_node(&self, artifact: &str) -> Option<&Node> {
        self.node_id(artifact).and_then(|id| self.nodes.get(&id))
    }

    pub fn get_node_by_id(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn artifact_of(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).map(|node| node.artifact.as_str())
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Nodes in ascending NodeId order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Edges in creation order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Artifact strings of both endpoints of an edge
    pub fn endpoints(&self, edge: &Edge) -> Option<(&str, &str)> {
        Some((self.artifact_of(edge.a)?, self.artifact_of(edge.b)?))
    }

    /// Edges touching an artifact, in creation order
    pub fn incident_edges(&self, artifact: &str) -> GraphResult<Vec<&Edge>> {
        let node_id = self.require(artifact)?;
        let mut edges: Vec<&Edge> = self
            .adjacency
            .get(&node_id)
            .map(|ids| ids.iter().filter_map(|id| self.edges.get(id)).collect())
            .unwrap_or_default();
        edges.sort_by_key(|edge| edge.id);
        Ok(edges)
    }

    /// Distinct artifacts linked to an artifact, sorted
    pub fn neighbors(&self, artifact: &str) -> GraphResult<Vec<&str>> {
        let node_id = self.require(artifact)?;
        let mut neighbors: Vec<&str> = self
            .incident_edges(artifact)?
            .into_iter()
            .filter_map(|edge| edge.other(node_id))
            .filter_map(|id| self.artifact_of(id))
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        Ok(neighbors)
    }

    /// Number of nodes per kind; kinds without nodes are absent
    pub fn kind_counts(&self) -> BTreeMap<ArtifactKind, usize> {
        let mut counts = BTreeMap::new();
        for node in self.nodes.values() {
            *counts.entry(node.kind).or_insert(0) += 1;
        }
        counts
    }

    pub fn statistics(&self) -> GraphStatistics {
        GraphStatistics {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            kinds: self.kind_counts(),
        }
    }

    /// Minimal enumeration of nodes and edges for rendering layers
    pub fn snapshot(&self) -> GraphSnapshot {
        let nodes = self
            .nodes
            .values()
            .map(|node| NodeView {
                id: node.id,
                artifact: node.artifact.clone(),
                kind: node.kind,
            })
            .collect();

        let edges = self
            .edges
            .values()
            .filter_map(|edge| {
                let (a, b) = self.endpoints(edge)?;
                Some(EdgeView {
                    a: a.to_string(),
                    b: b.to_string(),
                    relationship: edge.relationship.clone(),
                })
            })
            .collect();

        GraphSnapshot { nodes, edges }
    }

    pub fn default_relationship(&self) -> &Relationship {
        &self.default_relationship
    }

    fn require(&self, artifact: &str) -> GraphResult<NodeId> {
        self.node_id(artifact)
            .ok_or_else(|| GraphError::UnknownArtifact(artifact.to_string()))
    }

    /// Check the internal invariants; used by tests after every mutation
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.artifact_index.len(), self.nodes.len());
        assert_eq!(self.adjacency.len(), self.nodes.len());
        for (artifact, id) in &self.artifact_index {
            let node = self.nodes.get(id).expect("index points at missing node");
            assert_eq!(&node.artifact, artifact);
        }
        for edge in self.edges.values() {
            assert!(self.nodes.contains_key(&edge.a));
            assert!(self.nodes.contains_key(&edge.b));
            assert!(self.adjacency[&edge.a].contains(&edge.id));
            assert!(self.adjacency[&edge.b].contains(&edge.id));
        }
        for ids in self.adjacency.values() {
            for id in ids {
                assert!(self.edges.contains_key(id));
            }
        }
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}
