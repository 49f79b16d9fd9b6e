//! Chronosense investigation graph engine
//!
//! Helps an investigator build an evidence graph during a security incident:
//! observed artifacts (IP addresses, file hashes, file names, process names,
//! domains) become nodes, relationships between them become edges, and the
//! accumulated graph is described and handed to a hypothesis backend that
//! proposes attack narratives.
//!
//! # Components
//!
//! - [`graph::classify`]: artifact string to [`ArtifactKind`]
//! - [`GraphStore`]: nodes, edges and the artifact identity mapping
//! - [`summary`]: human summary and machine description of a store
//! - [`HeuristicEngine`]: deterministic rule-based hypotheses
//! - [`HypothesisBackend`]: heuristic engine or an injected external reasoner
//! - [`InvestigationSession`]: shared, lock-protected store for concurrent hosts
//!
//! The core is synchronous; only the backend seam and the session are async.
//!
//! ## Example Usage
//!
//! ```rust
//! use chronosense::{ArtifactKind, GraphStore, HeuristicEngine, summary};
//!
//! let mut store = GraphStore::new();
//! store.add_node("192.168.1.150").unwrap();
//! store.add_node("powershell.exe").unwrap();
//! store.add_edge("192.168.1.150", "powershell.exe", "executed_on").unwrap();
//!
//! assert_eq!(store.get_node("powershell.exe").unwrap().kind, ArtifactKind::File);
//!
//! let description = summary::machine_description(&store);
//! let hypotheses = HeuristicEngine::new().infer(&description);
//! assert_eq!(hypotheses[0].title, "Data exfiltration via scripting host");
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod config;
pub mod graph;
pub mod hypothesis;
pub mod session;
pub mod summary;

// Re-export main types for convenience
pub use graph::{
    classify, ArtifactKind, Edge, EdgeId, GraphError, GraphResult, GraphSnapshot, GraphStatistics,
    GraphStore, Node, NodeId, Relationship,
};

pub use hypothesis::{HeuristicEngine, Hypothesis, HypothesisKind, Indicators, TechniqueRef};

pub use backend::{
    Analysis, AnalysisSource, BackendError, BackendInfo, BackendResult, HypothesisBackend,
    PromptFocus, ReasoningBackend,
};

pub use config::{BackendConfig, BackendMode, ChronosenseConfig, ConfigError, GraphConfig};

pub use session::{InvestigationSession, SessionError, SessionResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
