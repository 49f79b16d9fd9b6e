//! End-to-end investigation scenarios over the public API
//!
//! Covers:
//! - Artifact uniqueness and classification at insertion
//! - Referential integrity across node removal
//! - Clear semantics
//! - Summary and description projections of a realistic case

use chronosense::summary::{self, EMPTY_GRAPH_SUMMARY, NO_ARTIFACTS_DESCRIPTION};
use chronosense::*;

#[test]
fn test_scripted_download_scenario() {
    let mut store = GraphStore::new();
    store.add_node("192.168.1.150").unwrap();
    store.add_node("powershell.exe").unwrap();
    store.add_node("evil.exe").unwrap();
    store.add_edge("192.168.1.150", "powershell.exe", "executed_on").unwrap();
    store.add_edge("powershell.exe", "evil.exe", "downloaded").unwrap();

    assert_eq!(store.node_count(), 3);
    assert_eq!(store.edge_count(), 2);

    let description = summary::machine_description(&store);
    let lines: Vec<&str> = description.lines().collect();

    assert!(lines.iter().any(|l| l.starts_with("- Ip:") && l.contains("192.168.1.150")));
    // powershell.exe is a File: the extension test runs before the process test
    assert!(lines
        .iter()
        .any(|l| l.starts_with("- File:") && l.contains("evil.exe") && l.contains("powershell.exe")));
    assert!(!lines.iter().any(|l| l.starts_with("- Process:")));

    let connections: Vec<&&str> = lines.iter().filter(|l| l.contains(" is linked to ")).collect();
    assert_eq!(connections.len(), 2);
    assert!(connections[0].contains("(executed_on)"));
    assert!(connections[1].contains("(downloaded)"));

    // IP plus the powershell keyword, no hash
    let hypotheses = HeuristicEngine::new().infer(&description);
    let kinds: Vec<HypothesisKind> = hypotheses.iter().map(|h| h.kind).collect();
    assert_eq!(kinds, vec![HypothesisKind::ScriptedExfiltration]);
}

#[test]
fn test_apt_investigation() {
    let mut store = GraphStore::new();
    let artifacts = [
        "192.168.1.100",
        "powershell.exe",
        "evil.exe",
        "c2-server.com",
        "a1b2c3d4e5f6789012345678901234567890abcd",
        "cmd.exe",
    ];
    for artifact in artifacts {
        store.add_node(artifact).unwrap();
    }

    let relationships = [
        ("192.168.1.100", "powershell.exe", "executed"),
        ("powershell.exe", "evil.exe", "downloaded"),
        ("evil.exe", "a1b2c3d4e5f6789012345678901234567890abcd", "has_hash"),
        ("evil.exe", "cmd.exe", "spawned"),
        ("cmd.exe", "c2-server.com", "connected_to"),
    ];
    for (a, b, rel) in relationships {
        store.add_edge(a, b, rel).unwrap();
    }

    assert_eq!(store.node_count(), artifacts.len());
    assert_eq!(store.edge_count(), relationships.len());

    let stats = store.statistics();
    assert_eq!(stats.kinds[&ArtifactKind::File], 3);
    assert_eq!(stats.kinds[&ArtifactKind::Domain], 1);
    assert_eq!(stats.kinds[&ArtifactKind::Hash], 1);
    assert_eq!(stats.kinds[&ArtifactKind::Ip], 1);

    assert_eq!(store.neighbors("evil.exe").unwrap().len(), 3);

    let hypotheses = HeuristicEngine::new().infer(&summary::machine_description(&store));
    let kinds: Vec<HypothesisKind> = hypotheses.iter().map(|h| h.kind).collect();
    assert_eq!(
        kinds,
        vec![HypothesisKind::ScriptedExfiltration, HypothesisKind::MalwareDeployment]
    );
}

#[test]
fn test_uniqueness_property() {
    let samples = ["8.8.8.8", "evil.exe", "", "  spaced  ", "ÜNICODE", "cmd"];
    let mut store = GraphStore::new();

    for (i, artifact) in samples.iter().enumerate() {
        store.add_node(*artifact).unwrap();
        assert_eq!(store.node_count(), i + 1);

        assert_eq!(
            store.add_node(*artifact),
            Err(GraphError::DuplicateArtifact(artifact.to_string()))
        );
        assert_eq!(store.node_count(), i + 1);
    }
}

#[test]
fn test_referential_integrity_after_removal() {
    let mut store = GraphStore::new();
    for artifact in ["a", "b", "c", "d"] {
        store.add_node(artifact).unwrap();
    }
    store.add_edge("a", "b", "x").unwrap();
    store.add_edge("b", "c", "y").unwrap();
    store.add_edge("c", "d", "z").unwrap();
    store.add_edge("d", "a", "w").unwrap();
    store.add_edge("b", "b", "self").unwrap();

    store.remove_node("b").unwrap();

    let remaining: Vec<&str> = store.edges().map(|e| e.relationship.as_str()).collect();
    assert_eq!(remaining, vec!["z", "w"]);

    let artifacts = store.all_artifacts();
    for edge in store.edges() {
        let (a, b) = store.endpoints(edge).unwrap();
        assert!(artifacts.contains(&a));
        assert!(artifacts.contains(&b));
    }
}

#[test]
fn test_failed_mutations_leave_store_untouched() {
    let mut store = GraphStore::new();
    store.add_node("a").unwrap();
    store.add_node("b").unwrap();
    store.add_edge("a", "b", "linked").unwrap();
    let before = store.snapshot();

    assert!(store.add_node("a").is_err());
    assert!(store.add_edge("a", "missing", "linked").is_err());
    assert!(store.add_edge("missing", "b", "linked").is_err());
    assert!(store.remove_node("missing").is_err());

    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_clear_resets_fully() {
    let mut store = GraphStore::new();
    for artifact in ["192.168.1.1", "malware.exe", "powershell.exe"] {
        store.add_node(artifact).unwrap();
    }
    store.connect("192.168.1.1", "malware.exe").unwrap();
    store.connect("malware.exe", "powershell.exe").unwrap();

    store.clear();

    assert_eq!(store.node_count(), 0);
    assert_eq!(store.edge_count(), 0);
    assert_eq!(store.add_node("malware.exe"), Ok(NodeId::new(1)));
}

#[test]
fn test_fresh_store_projections() {
    let store = GraphStore::new();
    assert!(summary::human_summary(&store).contains(EMPTY_GRAPH_SUMMARY));
    assert!(summary::machine_description(&store).contains(NO_ARTIFACTS_DESCRIPTION));
}

#[test]
fn test_snapshot_serializes_for_renderers() {
    let mut store = GraphStore::new();
    store.add_node("malicious-site.com").unwrap();
    store.add_node("8.8.8.8").unwrap();
    store.add_edge("malicious-site.com", "8.8.8.8", "resolves_to").unwrap();

    let json = serde_json::to_value(store.snapshot()).unwrap();
    assert_eq!(json["nodes"][0]["artifact"], "malicious-site.com");
    assert_eq!(json["nodes"][0]["kind"], "domain");
    assert_eq!(json["nodes"][1]["kind"], "ip");
    assert_eq!(json["edges"][0]["relationship"], "resolves_to");
}
