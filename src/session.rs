//! Shared investigation session
//!
//! The graph store itself is single-threaded. Hosts that read and mutate from
//! several tasks (a UI thread and a background analysis, say) go through this
//! wrapper, which serializes access behind one `RwLock`. Analysis holds the
//! read lock only while the description is built; the backend call runs
//! without it.

use crate::backend::{Analysis, HypothesisBackend, PromptFocus};
use crate::graph::{EdgeId, GraphError, GraphSnapshot, GraphStore, Node, NodeId, Relationship};
use crate::summary;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Investigation has no artifacts to analyse")]
    EmptyInvestigation,
}

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Clone)]
pub struct InvestigationSession {
    store: Arc<RwLock<GraphStore>>,
    backend: Arc<HypothesisBackend>,
}

impl InvestigationSession {
    pub fn new(store: GraphStore, backend: HypothesisBackend) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            backend: Arc::new(backend),
        }
    }

    /// Shared handle to the underlying store
    pub fn store(&self) -> Arc<RwLock<GraphStore>> {
        Arc::clone(&self.store)
    }

    pub fn backend(&self) -> &HypothesisBackend {
        &self.backend
    }

    pub async fn add_artifact(&self, artifact: impl Into<String>) -> SessionResult<NodeId> {
        Ok(self.store.write().await.add_node(artifact)?)
    }

    pub async fn link(
        &self,
        a: &str,
        b: &str,
        relationship: Option<&str>,
    ) -> SessionResult<EdgeId> {
        let mut store = self.store.write().await;
        let edge_id = match relationship {
            Some(rel) => store.add_edge(a, b, Relationship::new(rel))?,
            None => store.connect(a, b)?,
        };
        Ok(edge_id)
    }

    pub async fn remove_artifact(&self, artifact: &str) -> SessionResult<Node> {
        Ok(self.store.write().await.remove_node(artifact)?)
    }

    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    pub async fn summary(&self) -> String {
        summary::human_summary(&*self.store.read().await)
    }

    pub async fn description(&self) -> String {
        summary::machine_description(&*self.store.read().await)
    }

    pub async fn snapshot(&self) -> GraphSnapshot {
        self.store.read().await.snapshot()
    }

    /// Describe the current graph and hand it to the backend
    pub async fn analyze(&self) -> SessionResult<Analysis> {
        self.analyze_focused(PromptFocus::Investigation).await
    }

    /// Like [`InvestigationSession::analyze`], asking an external reasoner the
    /// prompt built for `focus`
    pub async fn analyze_focused(&self, focus: PromptFocus) -> SessionResult<Analysis> {
        let (description, prompt) = {
            let store = self.store.read().await;
            if store.is_empty() {
                return Err(SessionError::EmptyInvestigation);
            }
            (summary::machine_description(&store), focus.prompt(&store))
        };

        let analysis = self.backend.analyze_with_prompt(&description, &prompt).await;
        info!(
            "Analysis ({:?}) from {} finished with {} hypotheses",
            focus,
            self.backend.name(),
            analysis.hypotheses.len()
        );
        Ok(analysis)
    }
}
