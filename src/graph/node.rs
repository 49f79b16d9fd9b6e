//! Artifact node
//!
//! A node is the identity record of one observed artifact. Its kind is decided
//! once, at construction, and never changes afterward.

use super::artifact::{classify, ArtifactKind};
use super::types::NodeId;
use serde::{Deserialize, Serialize};

/// A node in the investigation graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Surrogate key, unique within the current store epoch
    pub id: NodeId,

    /// The artifact string this node stands for
    pub artifact: String,

    /// Classification assigned at creation
    pub kind: ArtifactKind,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Generated human description, e.g. "IP address: 8.8.8.8"
    pub description: String,
}

impl Node {
    /// Create a node, classifying the artifact
    pub fn new(id: NodeId, artifact: impl Into<String>) -> Self {
        let artifact = artifact.into();
        let kind = classify(&artifact);
        let description = kind.describe(&artifact);

        Node {
            id,
            artifact,
            kind,
            created_at: chrono::Utc::now().timestamp_millis(),
            description,
        }
    }
}
