//! Investigation graph
//!
//! Artifacts (IP addresses, hashes, domains, files, processes) are nodes keyed
//! by their string value; relationships between them are undirected, labelled
//! edges.

pub mod artifact;
pub mod edge;
pub mod node;
pub mod snapshot;
pub mod store;
pub mod types;

// Re-export main types
pub use artifact::{classify, ArtifactKind, FILE_EXTENSIONS, KNOWN_PROCESSES};
pub use edge::Edge;
pub use node::Node;
pub use snapshot::{EdgeView, GraphSnapshot, NodeView};
pub use store::{GraphError, GraphResult, GraphStatistics, GraphStore, DEFAULT_RELATIONSHIP};
pub use types::{EdgeId, NodeId, Relationship};
