//! Integration tests for the knowledge injection stage and the pipeline
//! runner composing it.

use std::path::Path;
use std::time::Duration;

use synapse_knowledge::injection::KnowledgeInjectionStage;
use synapse_knowledge::pipeline::{
    ContextStage, PipelineRunner, SessionState, StageConfig, StageContext,
};

async fn write_queue(root: &Path, content: &str) {
    let queue_dir = root.join("queue");
    tokio::fs::create_dir_all(&queue_dir).await.unwrap();
    tokio::fs::write(queue_dir.join("knowledge-queue.json"), content)
        .await
        .unwrap();
}

async fn write_brief(root: &Path, name: &str, body: &str) {
    let briefs_dir = root.join("briefs");
    tokio::fs::create_dir_all(&briefs_dir).await.unwrap();
    tokio::fs::write(briefs_dir.join(name), body).await.unwrap();
}

fn context_for(root: &Path, prompt: &str) -> StageContext {
    StageContext {
        prompt: prompt.to_string(),
        session: SessionState::default(),
        config: StageConfig {
            synapse_path: Some(root.to_path_buf()),
        },
    }
}

#[tokio::test]
async fn test_stage_injects_through_runner() {
    let dir = tempfile::tempdir().unwrap();
    write_brief(dir.path(), "dev-security-owasp.md", "Sanitize every input.").await;
    write_brief(dir.path(), "dev-api-design.md", "Version the endpoints.").await;
    write_queue(
        dir.path(),
        r#"{"queue": [
            {"agent": "dev", "briefPath": "briefs/dev-security-owasp.md"},
            {"agent": "dev", "briefPath": "briefs/dev-api-design.md"},
            {"agent": "qa", "briefPath": "briefs/qa-regression.md"}
        ]}"#,
    )
    .await;

    let mut runner = PipelineRunner::new();
    runner.add_stage(Box::new(
        KnowledgeInjectionStage::new().with_timeout_budget(Duration::from_secs(5)),
    ));

    let context = context_for(dir.path(), "@dev ship the login change");
    let outputs = runner.run(&context).await;

    assert_eq!(outputs.len(), 1);
    let output = &outputs[0];
    // Two brief blocks plus the closing instruction block.
    assert_eq!(output.rules.len(), 3);
    assert!(output.rules[0].contains("Sanitize every input."));
    assert!(output.rules[1].contains("Version the endpoints."));
    assert!(output.rules[2].contains("@dev"));
    assert_eq!(output.metadata.agent, "dev");
    assert_eq!(output.metadata.count, 2);
    assert_eq!(
        output.metadata.briefs,
        vec!["dev-security-owasp.md", "dev-api-design.md"]
    );
}

#[tokio::test]
async fn test_expired_entry_filters_to_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_brief(dir.path(), "b.md", "stale advice").await;
    write_queue(
        dir.path(),
        r#"[{"agent": "dev", "briefPath": "b.md", "expiresAt": "2000-01-01T00:00:00Z"}]"#,
    )
    .await;

    let stage = KnowledgeInjectionStage::new();
    let context = StageContext {
        prompt: String::new(),
        session: SessionState {
            active_agent: Some("dev".to_string()),
        },
        config: StageConfig {
            synapse_path: Some(dir.path().to_path_buf()),
        },
    };

    assert!(stage.process(&context).await.is_none());
}

#[tokio::test]
async fn test_future_expiry_still_injects() {
    let dir = tempfile::tempdir().unwrap();
    write_brief(dir.path(), "dev-hotfix.md", "Mind the migration order.").await;
    write_queue(
        dir.path(),
        r#"[{"agent": "dev", "briefPath": "briefs/dev-hotfix.md", "expiresAt": "2999-01-01T00:00:00Z"}]"#,
    )
    .await;

    let stage = KnowledgeInjectionStage::new();
    let context = context_for(dir.path(), "@dev go");

    let output = stage.process(&context).await.unwrap();
    assert_eq!(output.metadata.briefs, vec!["dev-hotfix.md"]);
}

#[tokio::test]
async fn test_runner_without_applicable_stage_is_empty() {
    let dir = tempfile::tempdir().unwrap();

    let mut runner = PipelineRunner::new();
    runner.add_stage(Box::new(
        KnowledgeInjectionStage::new().with_timeout_budget(Duration::from_secs(5)),
    ));

    // No queue on disk: the stage opts out, the pipeline continues.
    let context = context_for(dir.path(), "@dev anything");
    let outputs = runner.run(&context).await;

    assert!(outputs.is_empty());
}

#[tokio::test]
async fn test_stage_identity() {
    let stage = KnowledgeInjectionStage::new();
    assert_eq!(stage.name(), "knowledge-injection");
    assert_eq!(stage.layer_index(), KnowledgeInjectionStage::LAYER);
    assert!(stage.timeout_budget() > Duration::ZERO);
}
