use chronosense::{summary, GraphStore, HypothesisBackend, InvestigationSession};

/// Scripted APT investigation: initial artifacts, links, analysis, then a
/// second wave of discoveries and a fresh analysis.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Chronosense v{}", chronosense::version());
    println!("==========================================");
    println!();

    let session = InvestigationSession::new(GraphStore::new(), HypothesisBackend::heuristic());

    // Phase 1: initial artifacts
    println!("=== Phase 1: Initial artifacts ===");
    add_artifacts(
        &session,
        &[
            "192.168.1.150",
            "powershell.exe",
            "8.8.8.8",
            "malicious-domain.com",
            "evil.exe",
        ],
    )
    .await?;

    // Phase 2: relationships
    println!("\n=== Phase 2: Relationships ===");
    link_artifacts(
        &session,
        &[
            ("192.168.1.150", "powershell.exe", "executed_on"),
            ("powershell.exe", "8.8.8.8", "connected_to"),
            ("powershell.exe", "malicious-domain.com", "resolved"),
            ("malicious-domain.com", "evil.exe", "downloaded"),
            ("evil.exe", "192.168.1.150", "installed_on"),
        ],
    )
    .await?;

    // Phase 3: summary and first analysis
    println!("\n=== Phase 3: Graph analysis ===");
    println!("{}", session.summary().await);
    println!("\nDescription handed to the backend:");
    println!("{}", session.description().await);
    println!();
    println!("{}", session.analyze().await?.render());

    // Phase 4: additional discoveries
    println!("\n=== Phase 4: Additional artifacts ===");
    add_artifacts(
        &session,
        &[
            "a1b2c3d4e5f6789012345678901234567890abcd",
            "cmd.exe",
            "192.168.1.200",
            "backdoor.dll",
            "c2-server.net",
        ],
    )
    .await?;
    link_artifacts(
        &session,
        &[
            ("evil.exe", "a1b2c3d4e5f6789012345678901234567890abcd", "has_hash"),
            ("evil.exe", "cmd.exe", "spawned"),
            ("cmd.exe", "192.168.1.200", "connected_to"),
            ("backdoor.dll", "192.168.1.150", "installed_on"),
            ("192.168.1.200", "c2-server.net", "communicates_with"),
        ],
    )
    .await?;

    // Phase 5: refreshed analysis
    println!("\n=== Phase 5: Refreshed analysis ===");
    {
        let store = session.store();
        let store = store.read().await;
        println!("{}", summary::human_summary(&store));
    }
    println!();
    println!("{}", session.analyze().await?.render());

    println!("\n✅ Investigation complete");
    Ok(())
}

async fn add_artifacts(session: &InvestigationSession, artifacts: &[&str]) -> anyhow::Result<()> {
    for artifact in artifacts {
        let id = session.add_artifact(*artifact).await?;
        let store = session.store();
        let kind = store.read().await.get_node_by_id(id).map(|n| n.kind);
        if let Some(kind) = kind {
            println!("✓ Added {} ({})", artifact, kind);
        }
    }
    Ok(())
}

async fn link_artifacts(
    session: &InvestigationSession,
    links: &[(&str, &str, &str)],
) -> anyhow::Result<()> {
    for (a, b, relationship) in links {
        session.link(a, b, Some(*relationship)).await?;
        println!("✓ {} -[{}]- {}", a, relationship, b);
    }
    Ok(())
}
