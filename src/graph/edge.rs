//! Relationship edge between two artifacts
//!
//! Edges are undirected for storage: `a` and `b` keep the order the caller
//! gave, which projections reuse when rendering, but neither endpoint is
//! privileged. Self-loops (`a == b`) and parallel edges are allowed.

use super::types::{EdgeId, NodeId, Relationship};
use serde::{Deserialize, Serialize};

/// An edge in the investigation graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Identifier, increasing in creation order
    pub id: EdgeId,

    /// First endpoint, as supplied by the caller
    pub a: NodeId,

    /// Second endpoint, as supplied by the caller
    pub b: NodeId,

    /// Relationship label (e.g., "downloaded")
    pub relationship: Relationship,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
}

impl Edge {
    pub fn new(id: EdgeId, a: NodeId, b: NodeId, relationship: impl Into<Relationship>) -> Self {
        Edge {
            id,
            a,
            b,
            relationship: relationship.into(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.a == self.b
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.a == node {
            Some(self.b)
        } else if self.b == node {
            Some(self.a)
        } else {
            None
        }
    }
}
