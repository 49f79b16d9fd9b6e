//! Configuration
//!
//! Plain serde structs with defaults, so a partial YAML or JSON file is
//! accepted and missing fields keep their default values. The core never reads
//! configuration on its own; callers load it and pass the pieces in.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChronosenseConfig {
    pub graph: GraphConfig,
    pub backend: BackendConfig,
}

impl ChronosenseConfig {
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from a file: JSON for `.json`, YAML for anything else
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }
}

/// Graph store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Relationship label for links created without one
    pub default_relationship: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            default_relationship: crate::graph::DEFAULT_RELATIONSHIP.to_string(),
        }
    }
}

/// Which hypothesis backend the caller should wire in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Deterministic rule engine, always available
    #[default]
    Heuristic,
    /// An injected external reasoner (local model, HTTP API)
    External,
}

/// Hypothesis backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub mode: BackendMode,
    /// Model name passed to the external reasoner
    pub model: String,
    /// Base URL of the external reasoner
    pub api_base_url: String,
    /// Upper bound on one external generation call
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::Heuristic,
            model: "phi3".to_string(),
            api_base_url: "http://localhost:11434".to_string(),
            timeout_secs: 60,
            max_tokens: 512,
            temperature: 0.7,
        }
    }
}
