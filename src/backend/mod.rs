//! Hypothesis backends
//!
//! A [`HypothesisBackend`] turns a machine description into an [`Analysis`].
//! It is either the built-in [`HeuristicEngine`] or an injected
//! [`ReasoningBackend`] (a local model, an HTTP API). The crate ships no
//! external reasoner; callers decide which one to probe and hand it in.
//!
//! External calls are bounded by the configured timeout. Any failure, timeout
//! or empty answer is logged and answered by the heuristic engine, so
//! [`HypothesisBackend::analyze`] itself never fails.

pub mod analysis;
pub mod prompt;

pub use analysis::{Analysis, AnalysisSource};
pub use prompt::PromptFocus;

use crate::config::{BackendConfig, BackendMode};
use crate::hypothesis::HeuristicEngine;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
    #[error("Empty response")]
    EmptyResponse,
}

pub type BackendResult<T> = Result<T, BackendError>;

/// An external reasoner that answers a prompt with free text
#[async_trait]
pub trait ReasoningBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Cheap connectivity check
    async fn probe(&self) -> BackendResult<()>;

    async fn generate(&self, prompt: &str) -> BackendResult<String>;
}

/// Description of the active backend, for status displays
///
/// `available` is true only when an external reasoner passed its probe and is
/// answering; the heuristic engine reports false.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendInfo {
    pub backend: String,
    pub mode: BackendMode,
    pub available: bool,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

pub enum HypothesisBackend {
    Heuristic(HeuristicEngine),
    External {
        reasoner: Arc<dyn ReasoningBackend>,
        config: BackendConfig,
        fallback: HeuristicEngine,
    },
}

impl HypothesisBackend {
    pub fn heuristic() -> Self {
        HypothesisBackend::Heuristic(HeuristicEngine::new())
    }

    pub fn external(reasoner: Arc<dyn ReasoningBackend>, config: BackendConfig) -> Self {
        HypothesisBackend::External {
            reasoner,
            config,
            fallback: HeuristicEngine::new(),
        }
    }

    /// Pick a backend from configuration and an optional candidate reasoner.
    ///
    /// The candidate is used only in external mode and only if it answers a
    /// probe within the configured timeout.
    pub async fn select(
        config: &BackendConfig,
        candidate: Option<Arc<dyn ReasoningBackend>>,
    ) -> Self {
        let reasoner = match (config.mode, candidate) {
            (BackendMode::External, Some(reasoner)) => reasoner,
            (BackendMode::External, None) => {
                warn!("External backend requested but none supplied; using heuristic engine");
                return Self::heuristic();
            }
            (BackendMode::Heuristic, _) => {
                info!("Using heuristic hypothesis engine");
                return Self::heuristic();
            }
        };

        match tokio::time::timeout(config.timeout(), reasoner.probe()).await {
            Ok(Ok(())) => {
                info!("Using external hypothesis backend: {}", reasoner.name());
                Self::external(reasoner, config.clone())
            }
            Ok(Err(e)) => {
                warn!("Backend {} failed probe: {}; using heuristic engine", reasoner.name(), e);
                Self::heuristic()
            }
            Err(_) => {
                warn!("Backend {} probe timed out; using heuristic engine", reasoner.name());
                Self::heuristic()
            }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            HypothesisBackend::Heuristic(_) => "heuristic",
            HypothesisBackend::External { reasoner, .. } => reasoner.name(),
        }
    }

    pub fn info(&self) -> BackendInfo {
        match self {
            HypothesisBackend::Heuristic(_) => BackendInfo {
                backend: self.name().to_string(),
                mode: BackendMode::Heuristic,
                available: false,
                model: None,
                max_tokens: None,
                temperature: None,
            },
            HypothesisBackend::External { config, .. } => BackendInfo {
                backend: self.name().to_string(),
                mode: BackendMode::External,
                available: true,
                model: Some(config.model.clone()),
                max_tokens: Some(config.max_tokens),
                temperature: Some(config.temperature),
            },
        }
    }

    /// Generate hypotheses for a machine description
    pub async fn analyze(&self, description: &str) -> Analysis {
        self.analyze_with_prompt(description, &prompt::investigation_prompt(description))
            .await
    }

    /// Generate hypotheses, asking an external reasoner `prompt` instead of
    /// the default investigation prompt. The heuristic engine, including the
    /// fallback path, always works from `description`.
    pub async fn analyze_with_prompt(&self, description: &str, prompt: &str) -> Analysis {
        match self {
            HypothesisBackend::Heuristic(engine) => {
                let analysis = Analysis::heuristic(engine.infer(description));
                info!("Heuristic analysis produced {} hypotheses", analysis.hypotheses.len());
                analysis
            }
            HypothesisBackend::External {
                reasoner,
                config,
                fallback,
            } => match Self::call_external(reasoner.as_ref(), config, prompt).await {
                Ok(text) => {
                    info!("Backend {} answered ({} chars)", reasoner.name(), text.len());
                    Analysis::external(reasoner.name(), text)
                }
                Err(e) => {
                    warn!("Backend {} failed: {}; falling back to heuristic engine", reasoner.name(), e);
                    Analysis::fallback(reasoner.name(), e.to_string(), fallback.infer(description))
                }
            },
        }
    }

    async fn call_external(
        reasoner: &dyn ReasoningBackend,
        config: &BackendConfig,
        prompt: &str,
    ) -> BackendResult<String> {
        let timeout = config.timeout();

        let text = tokio::time::timeout(timeout, reasoner.generate(prompt))
            .await
            .map_err(|_| BackendError::Timeout(timeout))??;

        let text = text.trim();
        if text.is_empty() {
            return Err(BackendError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

impl Default for HypothesisBackend {
    fn default() -> Self {
        Self::heuristic()
    }
}

impl std::fmt::Debug for HypothesisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HypothesisBackend")
            .field("backend", &self.name())
            .finish()
    }
}
