//! Textual projections of a graph store
//!
//! Two read-only views of the current store state:
//!
//! - [`human_summary`]: statistics, kind breakdown, artifacts and links for an
//!   investigator
//! - [`machine_description`]: artifacts grouped by kind plus one sentence per
//!   link, the input handed to any hypothesis backend
//!
//! Output is a pure function of the store: kinds follow [`ArtifactKind::ALL`],
//! artifacts are sorted lexicographically and edges follow creation order.

use crate::graph::{ArtifactKind, GraphStore};
use std::collections::BTreeMap;

/// Human summary of a store with no nodes
pub const EMPTY_GRAPH_SUMMARY: &str = "Empty graph - no artifacts added";

/// Machine description of a store with no nodes
pub const NO_ARTIFACTS_DESCRIPTION: &str = "No artifacts detected in the investigation.";

/// Closing sentence of a machine description when nodes exist but no edges
pub const NO_CONNECTIONS_DESCRIPTION: &str =
    "No explicit connections identified between the artifacts.";

pub const ARTIFACTS_HEADER: &str = "Artifacts detected in the investigation:";
pub const CONNECTIONS_HEADER: &str = "Connections identified:";

/// Render the investigator-facing summary
pub fn human_summary(store: &GraphStore) -> String {
    if store.is_empty() {
        return EMPTY_GRAPH_SUMMARY.to_string();
    }

    let mut lines = Vec::new();
    lines.push("📊 Statistics:".to_string());
    lines.push(format!("   • Nodes (artifacts): {}", store.node_count()));
    lines.push(format!("   • Links: {}", store.edge_count()));
    lines.push(String::new());

    lines.push("📋 Artifact kinds:".to_string());
    for (kind, count) in store.kind_counts() {
        lines.push(format!("   {} {}: {}", kind.glyph(), kind.label(), count));
    }
    lines.push(String::new());

    lines.push("🔍 Artifacts:".to_string());
    let mut nodes: Vec<_> = store.nodes().collect();
    nodes.sort_by(|x, y| x.artifact.cmp(&y.artifact));
    for node in nodes {
        lines.push(format!("   {} {}", node.kind.glyph(), node.artifact));
    }

    if store.edge_count() > 0 {
        lines.push(String::new());
        lines.push("🔗 Connections:".to_string());
        for edge in store.edges() {
            if let Some((a, b)) = store.endpoints(edge) {
                lines.push(format!("   • {} <-> {} ({})", a, b, edge.relationship));
            }
        }
    }

    lines.join("\n")
}

/// Render the description consumed by hypothesis backends
pub fn machine_description(store: &GraphStore) -> String {
    if store.is_empty() {
        return NO_ARTIFACTS_DESCRIPTION.to_string();
    }

    let mut lines = vec![ARTIFACTS_HEADER.to_string()];
    for (kind, artifacts) in artifacts_by_kind(store) {
        lines.push(format!("- {}: {}", kind.label(), artifacts.join(", ")));
    }

    lines.push(String::new());
    if store.edge_count() > 0 {
        lines.push(CONNECTIONS_HEADER.to_string());
        for edge in store.edges() {
            if let Some((a, b)) = store.endpoints(edge) {
                lines.push(format!("- {} is linked to {} ({})", a, b, edge.relationship));
            }
        }
    } else {
        lines.push(NO_CONNECTIONS_DESCRIPTION.to_string());
    }

    lines.join("\n")
}

/// Artifacts grouped by kind, each group sorted; empty kinds are absent
pub fn artifacts_by_kind(store: &GraphStore) -> BTreeMap<ArtifactKind, Vec<&str>> {
    let mut groups: BTreeMap<ArtifactKind, Vec<&str>> = BTreeMap::new();
    for node in store.nodes() {
        groups.entry(node.kind).or_default().push(node.artifact.as_str());
    }
    for artifacts in groups.values_mut() {
        artifacts.sort_unstable();
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> GraphStore {
        let mut store = GraphStore::new();
        store.add_node("192.168.1.150").unwrap();
        store.add_node("powershell.exe").unwrap();
        store.add_node("evil.exe").unwrap();
        store.add_edge("192.168.1.150", "powershell.exe", "executed_on").unwrap();
        store.add_edge("powershell.exe", "evil.exe", "downloaded").unwrap();
        store
    }

    #[test]
    fn test_empty_store() {
        let store = GraphStore::new();
        assert_eq!(human_summary(&store), EMPTY_GRAPH_SUMMARY);
        assert_eq!(machine_description(&store), NO_ARTIFACTS_DESCRIPTION);
    }

    #[test]
    fn test_human_summary() {
        let summary = human_summary(&scenario());
        let expected = "\
📊 Statistics:
   • Nodes (artifacts): 3
   • Links: 2

📋 Artifact kinds:
   🌐 Ip: 1
   📄 File: 2

🔍 Artifacts:
   🌐 192.168.1.150
   📄 evil.exe
   📄 powershell.exe

🔗 Connections:
   • 192.168.1.150 <-> powershell.exe (executed_on)
   • powershell.exe <-> evil.exe (downloaded)";
        assert_eq!(summary, expected);
    }

    #[test]
    fn test_human_summary_without_edges() {
        let mut store = GraphStore::new();
        store.add_node("8.8.8.8").unwrap();

        let summary = human_summary(&store);
        assert!(summary.contains("   • Links: 0"));
        assert!(!summary.contains("Connections"));
    }

    #[test]
    fn test_machine_description() {
        let description = machine_description(&scenario());
        let expected = "\
Artifacts detected in the investigation:
- Ip: 192.168.1.150
- File: evil.exe, powershell.exe

Connections identified:
- 192.168.1.150 is linked to powershell.exe (executed_on)
- powershell.exe is linked to evil.exe (downloaded)";
        assert_eq!(description, expected);
    }

    #[test]
    fn test_machine_description_without_edges() {
        let mut store = GraphStore::new();
        store.add_node("malicious-site.com").unwrap();
        store.add_node("a-host.org").unwrap();

        let description = machine_description(&store);
        assert!(description.contains("- Domain: a-host.org, malicious-site.com"));
        assert!(description.ends_with(NO_CONNECTIONS_DESCRIPTION));
    }

    #[test]
    fn test_projections_independent_of_insertion_order() {
        let mut forward = GraphStore::new();
        let mut backward = GraphStore::new();
        let artifacts = ["cmd", "8.8.8.8", "evil.exe", "c2-server.net"];
        for artifact in artifacts {
            forward.add_node(artifact).unwrap();
        }
        for artifact in artifacts.iter().rev() {
            backward.add_node(*artifact).unwrap();
        }

        assert_eq!(machine_description(&forward), machine_description(&backward));
        assert_eq!(human_summary(&forward), human_summary(&backward));
    }
}
