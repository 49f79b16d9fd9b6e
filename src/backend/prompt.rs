//! Prompt templates for external reasoners
//!
//! The machine description is the default input a reasoner needs; these wrap
//! it with the analyst role and the expected answer shape. A [`PromptFocus`]
//! narrows the prompt to a criticality assessment or to the malware or network
//! artifacts of a store.

use crate::graph::{ArtifactKind, GraphStore};
use crate::summary;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which question an external reasoner is asked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptFocus {
    /// Two hypotheses with one action each
    #[default]
    Investigation,
    /// Hypotheses, actions and a criticality rating
    Assessment,
    /// File and hash indicators only
    Malware,
    /// IP and domain indicators only
    Network,
}

impl PromptFocus {
    /// Artifact kinds a narrowed focus draws from; empty for whole-graph prompts
    pub fn kinds(&self) -> &'static [ArtifactKind] {
        match self {
            PromptFocus::Investigation | PromptFocus::Assessment => &[],
            PromptFocus::Malware => &[ArtifactKind::File, ArtifactKind::Hash],
            PromptFocus::Network => &[ArtifactKind::Ip, ArtifactKind::Domain],
        }
    }

    /// Build the prompt for a store.
    ///
    /// A narrowed focus whose kinds are absent from the store falls back to
    /// the investigation prompt.
    pub fn prompt(&self, store: &GraphStore) -> String {
        let description = summary::machine_description(store);
        match self {
            PromptFocus::Investigation => investigation_prompt(&description),
            PromptFocus::Assessment => assessment_prompt(&description),
            PromptFocus::Malware | PromptFocus::Network => {
                let groups = summary::artifacts_by_kind(store);
                let artifacts: Vec<&str> = self
                    .kinds()
                    .iter()
                    .filter_map(|kind| groups.get(kind))
                    .flatten()
                    .copied()
                    .collect();

                if artifacts.is_empty() {
                    debug!("No artifacts for {:?} focus; using investigation prompt", self);
                    return investigation_prompt(&description);
                }
                match self {
                    PromptFocus::Malware => malware_analysis_prompt(&artifacts),
                    _ => network_analysis_prompt(&artifacts),
                }
            }
        }
    }
}

/// Structured DFIR prompt around a machine description
pub fn investigation_prompt(description: &str) -> String {
    format!(
        "As a DFIR (Digital Forensics and Incident Response) expert, analyse the following \
artifacts from an ongoing investigation.

**Known artifacts:**
{}

**Your mission:**
1. Generate 2 plausible hypotheses about the type of attack in progress, based on MITRE ATT&CK TTPs.
2. For each hypothesis, propose 1 concrete, immediate investigative action the analyst should take to confirm or rule it out.

Keep the answer clear and concise.

**Answer:**",
        description
    )
}

/// Investigation prompt that also asks for a criticality rating
pub fn assessment_prompt(description: &str) -> String {
    format!(
        "As a DFIR expert, analyse the following artifacts:

{}

Provide:
1. Two attack hypotheses based on MITRE ATT&CK
2. Concrete investigative actions for each hypothesis
3. An assessment of the criticality level (Low/Medium/High/Critical)

Answer in a structured, professional manner.",
        description
    )
}

/// Malware triage prompt over file and hash indicators
pub fn malware_analysis_prompt(artifacts: &[&str]) -> String {
    format!(
        "Analyse the following malware indicators:
{}

Determine:
1. The likely malware family or type
2. Possible evasion techniques
3. IOCs to monitor
4. Recommended containment measures",
        bullet_list(artifacts)
    )
}

/// Network triage prompt over address and domain indicators
pub fn network_analysis_prompt(artifacts: &[&str]) -> String {
    format!(
        "Analyse the following network artifacts:
{}

Assess:
1. Suspicious communication patterns
2. Command and control (C2) indicators
3. Signs of data exfiltration
4. Network monitoring recommendations",
        bullet_list(artifacts)
    )
}

fn bullet_list(artifacts: &[&str]) -> String {
    artifacts
        .iter()
        .map(|a| format!("- {}", a))
        .collect::<Vec<_>>()
        .join("\n")
}
