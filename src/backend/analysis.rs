//! Result of one hypothesis-generation pass

use crate::hypothesis::{render_hypotheses, Hypothesis};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Where an analysis came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisSource {
    /// The heuristic engine was the configured backend
    Heuristic,
    /// An external reasoner answered
    External { backend: String },
    /// An external reasoner failed and the heuristic engine answered instead
    Fallback { backend: String, reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub source: AnalysisSource,
    /// Structured hypotheses; empty when an external reasoner answered
    pub hypotheses: Vec<Hypothesis>,
    /// Free-form text from an external reasoner
    pub narrative: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl Analysis {
    pub fn heuristic(hypotheses: Vec<Hypothesis>) -> Self {
        Self {
            source: AnalysisSource::Heuristic,
            hypotheses,
            narrative: None,
            generated_at: Utc::now(),
        }
    }

    pub fn external(backend: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: AnalysisSource::External {
                backend: backend.into(),
            },
            hypotheses: Vec::new(),
            narrative: Some(text.into()),
            generated_at: Utc::now(),
        }
    }

    pub fn fallback(
        backend: impl Into<String>,
        reason: impl Into<String>,
        hypotheses: Vec<Hypothesis>,
    ) -> Self {
        Self {
            source: AnalysisSource::Fallback {
                backend: backend.into(),
                reason: reason.into(),
            },
            hypotheses,
            narrative: None,
            generated_at: Utc::now(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, AnalysisSource::Fallback { .. })
    }

    /// Full text report for display
    pub fn render(&self) -> String {
        let mut parts = vec![
            "🤖 **AI ANALYSIS - INVESTIGATION HYPOTHESES**".to_string(),
            "=".repeat(50),
            String::new(),
        ];

        match &self.narrative {
            Some(text) => {
                parts.push(text.trim().to_string());
                parts.push(String::new());
            }
            None => parts.push(render_hypotheses(&self.hypotheses)),
        }

        match &self.source {
            AnalysisSource::Heuristic => {
                parts.push("💡 **Note:** This analysis was generated by the heuristic engine.".to_string());
                parts.push("Configure an external reasoning backend for a complete analysis.".to_string());
                parts.push(String::new());
            }
            AnalysisSource::Fallback { backend, reason } => {
                parts.push(format!(
                    "💡 **Note:** {} was unavailable ({}); heuristic analysis shown.",
                    backend, reason
                ));
                parts.push(String::new());
            }
            AnalysisSource::External { .. } => {}
        }

        parts.push(format!(
            "⏰ Analysis generated on {}",
            self.generated_at.format("%d/%m/%Y at %H:%M:%S")
        ));
        parts.join("\n")
    }
}
