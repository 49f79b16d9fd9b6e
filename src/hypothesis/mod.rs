//! Attack hypotheses
//!
//! A hypothesis is a candidate explanation of attacker behaviour, backed by
//! MITRE ATT&CK technique references and a next investigative step. The
//! [`HeuristicEngine`] derives them deterministically from a machine
//! description; external reasoners produce free text instead (see
//! [`crate::backend`]).

pub mod engine;
pub mod indicators;
pub mod report;

pub use engine::HeuristicEngine;
pub use indicators::Indicators;
pub use report::render_hypotheses;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A MITRE ATT&CK technique reference, e.g. `T1059.001 (PowerShell)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueRef {
    pub id: String,
    pub name: String,
}

impl TechniqueRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TechniqueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.name)
    }
}

/// The fixed set of hypotheses the heuristic engine knows how to raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HypothesisKind {
    ScriptedExfiltration,
    MalwareDeployment,
    InitialReconnaissance,
    PersistenceEstablishment,
}

impl HypothesisKind {
    /// Build the full hypothesis for this kind
    pub fn hypothesis(self) -> Hypothesis {
        match self {
            HypothesisKind::ScriptedExfiltration => Hypothesis {
                kind: self,
                title: "Data exfiltration via scripting host".to_string(),
                narrative: "The artifacts suggest a scripting interpreter such as PowerShell \
                            was used to communicate with external hosts and move data out."
                    .to_string(),
                technique_refs: vec![
                    TechniqueRef::new("T1041", "Exfiltration Over C2 Channel"),
                    TechniqueRef::new("T1059.001", "PowerShell"),
                ],
                recommended_action: "Review outbound network logs for connections to the \
                                     observed addresses and examine the PowerShell command history."
                    .to_string(),
            },
            HypothesisKind::MalwareDeployment => Hypothesis {
                kind: self,
                title: "Malware deployment".to_string(),
                narrative: "Executable files with specific hashes point to a malware payload \
                            being dropped and run on the host."
                    .to_string(),
                technique_refs: vec![
                    TechniqueRef::new("T1204", "User Execution"),
                    TechniqueRef::new("T1105", "Ingress Tool Transfer"),
                ],
                recommended_action: "Check the hashes against threat-intel sources (VirusTotal, \
                                     MISP) and detonate the file in a sandbox."
                    .to_string(),
            },
            HypothesisKind::InitialReconnaissance => Hypothesis {
                kind: self,
                title: "Initial reconnaissance".to_string(),
                narrative: "The collected artifacts are consistent with a reconnaissance or \
                            discovery phase on the network."
                    .to_string(),
                technique_refs: vec![
                    TechniqueRef::new("T1083", "File and Directory Discovery"),
                    TechniqueRef::new("T1057", "Process Discovery"),
                ],
                recommended_action: "Examine system logs for discovery activity and correlate \
                                     it with other suspicious events."
                    .to_string(),
            },
            HypothesisKind::PersistenceEstablishment => Hypothesis {
                kind: self,
                title: "Persistence establishment".to_string(),
                narrative: "The observed elements may indicate an attempt to establish \
                            persistence on the system."
                    .to_string(),
                technique_refs: vec![
                    TechniqueRef::new("T1547", "Boot or Logon Autostart Execution"),
                    TechniqueRef::new("T1053", "Scheduled Task/Job"),
                ],
                recommended_action: "Inspect autostart locations and scheduled tasks for \
                                     recent suspicious changes."
                    .to_string(),
            },
        }
    }
}

/// A candidate attack narrative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub kind: HypothesisKind,
    pub title: String,
    pub narrative: String,
    pub technique_refs: Vec<TechniqueRef>,
    pub recommended_action: String,
}

impl Hypothesis {
    /// Technique references joined for display
    pub fn techniques_line(&self) -> String {
        self.technique_refs
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
