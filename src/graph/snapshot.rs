//! Plain-data views of a store for rendering and export
//!
//! These carry just enough for a caller to lay the graph out itself; the
//! store performs no layout.

use super::artifact::ArtifactKind;
use super::types::{NodeId, Relationship};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: NodeId,
    pub artifact: String,
    pub kind: ArtifactKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeView {
    pub a: String,
    pub b: String,
    pub relationship: Relationship,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}
