//! Backend selection and fallback behaviour with injected reasoners

use async_trait::async_trait;
use chronosense::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Reasoner whose probe and answer are scripted per test
struct Scripted {
    probe: BackendResult<()>,
    answer: BackendResult<String>,
    delay: Duration,
    calls: AtomicUsize,
}

impl Scripted {
    fn answering(answer: BackendResult<String>) -> Self {
        Self {
            probe: Ok(()),
            answer,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::answering(Ok("too late".to_string()))
        }
    }
}

#[async_trait]
impl ReasoningBackend for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn probe(&self) -> BackendResult<()> {
        self.probe.clone()
    }

    async fn generate(&self, prompt: &str) -> BackendResult<String> {
        assert!(prompt.ends_with("**Answer:**"));
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.answer.clone()
    }
}

fn external_config(timeout_secs: u64) -> BackendConfig {
    BackendConfig {
        mode: BackendMode::External,
        timeout_secs,
        ..BackendConfig::default()
    }
}

const DESCRIPTION: &str = "Artifacts detected in the investigation:\n- Ip: 10.0.0.5\n- Process: cmd\n";

#[tokio::test]
async fn test_external_answer_is_used() {
    let reasoner = Arc::new(Scripted::answering(Ok("  Lateral movement via SMB.  ".to_string())));
    let backend = HypothesisBackend::external(reasoner.clone(), external_config(5));

    let analysis = backend.analyze(DESCRIPTION).await;

    assert_eq!(
        analysis.source,
        AnalysisSource::External {
            backend: "scripted".to_string()
        }
    );
    assert_eq!(analysis.narrative.as_deref(), Some("Lateral movement via SMB."));
    assert!(analysis.hypotheses.is_empty());
    assert_eq!(reasoner.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_slow_backend_times_out_and_falls_back() {
    let reasoner = Arc::new(Scripted::slow(Duration::from_secs(30)));
    let backend = HypothesisBackend::external(reasoner, external_config(1));

    let analysis = backend.analyze(DESCRIPTION).await;

    assert!(analysis.is_fallback());
    let kinds: Vec<HypothesisKind> = analysis.hypotheses.iter().map(|h| h.kind).collect();
    assert_eq!(kinds, vec![HypothesisKind::ScriptedExfiltration]);
    match analysis.source {
        AnalysisSource::Fallback { backend, reason } => {
            assert_eq!(backend, "scripted");
            assert!(reason.contains("Timed out"));
        }
        other => panic!("unexpected source {:?}", other),
    }
}

#[tokio::test]
async fn test_error_and_empty_answers_fall_back() {
    for answer in [
        Err(BackendError::ApiError("500".to_string())),
        Ok("   \n".to_string()),
    ] {
        let backend = HypothesisBackend::external(Arc::new(Scripted::answering(answer)), external_config(5));
        let analysis = backend.analyze("").await;

        assert!(analysis.is_fallback());
        let kinds: Vec<HypothesisKind> = analysis.hypotheses.iter().map(|h| h.kind).collect();
        assert_eq!(
            kinds,
            vec![
                HypothesisKind::InitialReconnaissance,
                HypothesisKind::PersistenceEstablishment
            ]
        );
    }
}

#[tokio::test]
async fn test_select_probes_candidate() {
    let healthy: Arc<dyn ReasoningBackend> = Arc::new(Scripted::answering(Ok("ok".to_string())));
    let backend = HypothesisBackend::select(&external_config(5), Some(healthy)).await;
    assert_eq!(backend.name(), "scripted");
    assert_eq!(backend.info().mode, BackendMode::External);
    assert!(backend.info().available);

    let broken: Arc<dyn ReasoningBackend> = Arc::new(Scripted {
        probe: Err(BackendError::Unavailable("connection refused".to_string())),
        ..Scripted::answering(Ok("ok".to_string()))
    });
    let backend = HypothesisBackend::select(&external_config(5), Some(broken)).await;
    assert_eq!(backend.name(), "heuristic");
    let info = backend.info();
    assert_eq!(info.mode, BackendMode::Heuristic);
    assert!(!info.available);
}

#[tokio::test]
async fn test_select_honours_heuristic_mode() {
    let candidate: Arc<dyn ReasoningBackend> = Arc::new(Scripted::answering(Ok("ok".to_string())));
    let backend = HypothesisBackend::select(&BackendConfig::default(), Some(candidate)).await;
    assert_eq!(backend.name(), "heuristic");

    let backend = HypothesisBackend::select(&external_config(5), None).await;
    assert_eq!(backend.name(), "heuristic");
    assert!(!backend.info().available);
}

#[tokio::test]
async fn test_session_analysis_through_external_backend() {
    let reasoner = Arc::new(Scripted::answering(Ok("Hypothesis: beaconing.".to_string())));
    let session = InvestigationSession::new(
        GraphStore::new(),
        HypothesisBackend::external(reasoner, external_config(5)),
    );
    session.add_artifact("10.0.0.5").await.unwrap();
    session.add_artifact("cmd").await.unwrap();
    session.link("10.0.0.5", "cmd", Some("spawned")).await.unwrap();

    let analysis = session.analyze().await.unwrap();
    assert!(!analysis.is_fallback());
    assert!(analysis.render().contains("Hypothesis: beaconing."));
}

/// Reasoner that keeps every prompt it was asked
#[derive(Default)]
struct Recording {
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl ReasoningBackend for Recording {
    fn name(&self) -> &str {
        "recording"
    }

    async fn probe(&self) -> BackendResult<()> {
        Ok(())
    }

    async fn generate(&self, prompt: &str) -> BackendResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("noted".to_string())
    }
}

#[tokio::test]
async fn test_focused_session_analysis_sends_focused_prompt() {
    let reasoner = Arc::new(Recording::default());
    let session = InvestigationSession::new(
        GraphStore::new(),
        HypothesisBackend::external(reasoner.clone(), external_config(5)),
    );
    for artifact in ["evil.exe", "8.8.8.8", "d41d8cd98f00b204e9800998ecf8427e"] {
        session.add_artifact(artifact).await.unwrap();
    }

    session.analyze_focused(PromptFocus::Malware).await.unwrap();
    session.analyze_focused(PromptFocus::Assessment).await.unwrap();
    session.analyze().await.unwrap();

    let prompts = reasoner.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[0].contains("malware indicators"));
    assert!(prompts[0].contains("- evil.exe"));
    assert!(!prompts[0].contains("8.8.8.8"));
    assert!(prompts[1].contains("(Low/Medium/High/Critical)"));
    assert!(prompts[2].ends_with("**Answer:**"));
}

#[tokio::test]
async fn test_focused_prompt_fallback_uses_description() {
    let reasoner = Arc::new(Scripted::answering(Err(BackendError::NetworkError("refused".to_string()))));
    let backend = HypothesisBackend::external(reasoner, external_config(5));

    // the scripted reasoner only accepts investigation-shaped prompts
    let prompt = chronosense::backend::prompt::investigation_prompt("unused");
    let analysis = backend.analyze_with_prompt(DESCRIPTION, &prompt).await;

    assert!(analysis.is_fallback());
    let kinds: Vec<HypothesisKind> = analysis.hypotheses.iter().map(|h| h.kind).collect();
    assert_eq!(kinds, vec![HypothesisKind::ScriptedExfiltration]);
}
