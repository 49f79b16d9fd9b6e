//! Core identifier and label types for the investigation graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Surrogate key of a node, allocated by the store in increasing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        NodeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node_{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Identifier of an edge, in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeId(pub u64);

impl EdgeId {
    pub fn new(id: u64) -> Self {
        EdgeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge_{}", self.0)
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        EdgeId(id)
    }
}

/// Relationship label carried by an edge (e.g., "downloaded", "connected_to")
///
/// Edges are stored undirected; the label is where any direction lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Relationship(String);

impl Relationship {
    pub fn new(relationship: impl Into<String>) -> Self {
        Relationship(relationship.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Relationship {
    fn from(s: String) -> Self {
        Relationship(s)
    }
}

impl From<&str> for Relationship {
    fn from(s: &str) -> Self {
        Relationship(s.to_string())
    }
}

impl From<&String> for Relationship {
    fn from(s: &String) -> Self {
        Relationship(s.clone())
    }
}
