//! Presence indicators extracted from a machine description
//!
//! Detection is keyword based, not a graph traversal: a description line that
//! starts with a kind marker (`- Ip: ...`) sets the matching flag, and so do
//! loose tokens that look like the kind (a dotted quad, a long hex digest, an
//! `.exe` name, a known process name).

use crate::graph::artifact::{is_ipv4, KNOWN_PROCESSES};
use serde::Serialize;

/// Minimum length of a hex token to count as a hash; unlike classification
/// there is no upper bound
const MIN_HASH_TOKEN_LEN: usize = 32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Indicators {
    pub has_ip: bool,
    pub has_file: bool,
    pub has_process: bool,
    pub has_hash: bool,
}

impl Indicators {
    pub fn from_description(description: &str) -> Self {
        let lower = description.to_lowercase();
        let tokens: Vec<&str> = description
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_ascii_alphanumeric()))
            .filter(|t| !t.is_empty())
            .collect();

        let has_ip = has_marker(&lower, "ip") || tokens.iter().any(|t| is_ipv4(t));
        let has_file = has_marker(&lower, "file") || lower.contains(".exe");
        let has_process = has_marker(&lower, "process")
            || KNOWN_PROCESSES.iter().any(|proc| lower.contains(proc));
        let has_hash = has_marker(&lower, "hash")
            || tokens
                .iter()
                .any(|t| t.len() >= MIN_HASH_TOKEN_LEN && t.chars().all(|c| c.is_ascii_hexdigit()));

        Indicators {
            has_ip,
            has_file,
            has_process,
            has_hash,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.has_ip || self.has_file || self.has_process || self.has_hash)
    }
}

/// True if some line, after an optional list dash, starts with `<kind>:`
fn has_marker(lower: &str, kind: &str) -> bool {
    lower.lines().any(|line| {
        let line = line.trim_start().trim_start_matches('-').trim_start();
        line.strip_prefix(kind)
            .is_some_and(|rest| rest.starts_with(':'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_markers() {
        let indicators = Indicators::from_description(
            "Artifacts detected in the investigation:\n- Ip: x\n- File: y\n- Process: z\n- Hash: w",
        );
        assert!(indicators.has_ip);
        assert!(indicators.has_file);
        assert!(indicators.has_process);
        assert!(indicators.has_hash);
    }

    #[test]
    fn test_loose_tokens() {
        let indicators = Indicators::from_description(
            "beacon from 10.0.0.5, then powershell fetched evil.exe \
             (d41d8cd98f00b204e9800998ecf8427e)",
        );
        assert!(indicators.has_ip);
        assert!(indicators.has_process);
        assert!(indicators.has_file);
        assert!(indicators.has_hash);
    }

    #[test]
    fn test_marker_must_start_a_line() {
        let indicators = Indicators::from_description("- a is linked to b (ownership: shared)");
        assert!(!indicators.has_ip);
        assert!(indicators.is_empty());
    }

    #[test]
    fn test_short_hex_is_not_hash() {
        let indicators = Indicators::from_description("deadbeef cafebabe");
        assert!(!indicators.has_hash);
    }

    #[test]
    fn test_nothing_detected() {
        let indicators =
            Indicators::from_description("- Domain: example.org\n- Unknown: unknown_artifact");
        assert_eq!(indicators, Indicators::default());
    }
}
