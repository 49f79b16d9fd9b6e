//! Deterministic heuristic inference
//!
//! Rules are evaluated in table order and every rule that matches contributes
//! its hypothesis. When none match, the two generic fallback hypotheses are
//! returned instead, so a non-empty description never yields an empty result.

use super::indicators::Indicators;
use super::{Hypothesis, HypothesisKind};
use tracing::debug;

/// One row of the rule table
struct Rule {
    kind: HypothesisKind,
    applies: fn(&Indicators) -> bool,
}

const RULES: &[Rule] = &[
    Rule {
        kind: HypothesisKind::ScriptedExfiltration,
        applies: |i| i.has_ip && i.has_process,
    },
    Rule {
        kind: HypothesisKind::MalwareDeployment,
        applies: |i| i.has_file && i.has_hash,
    },
];

const FALLBACK: [HypothesisKind; 2] = [
    HypothesisKind::InitialReconnaissance,
    HypothesisKind::PersistenceEstablishment,
];

/// Rule-based hypothesis engine; needs no network and no external process
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEngine;

impl HeuristicEngine {
    pub fn new() -> Self {
        HeuristicEngine
    }

    /// Infer hypotheses from a machine description
    pub fn infer(&self, description: &str) -> Vec<Hypothesis> {
        self.infer_kinds(&Indicators::from_description(description))
            .into_iter()
            .map(HypothesisKind::hypothesis)
            .collect()
    }

    /// Hypothesis kinds raised by a feature set, in output order
    pub fn infer_kinds(&self, indicators: &Indicators) -> Vec<HypothesisKind> {
        let matched: Vec<HypothesisKind> = RULES
            .iter()
            .filter(|rule| (rule.applies)(indicators))
            .map(|rule| rule.kind)
            .collect();

        debug!("Heuristic rules matched {:?} for {:?}", matched, indicators);

        if matched.is_empty() {
            FALLBACK.to_vec()
        } else {
            matched
        }
    }
}
