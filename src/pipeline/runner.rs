//! Ordered pipeline runner.

use super::context::StageContext;
use super::stage::{ContextStage, StageOutput};

/// Runs stages in layer order, each under its own timeout budget.
///
/// A stage that opts out or overruns its budget leaves the pipeline
/// unaffected; overrun is treated as fire-and-forget, never as an error.
#[derive(Default)]
pub struct PipelineRunner {
    stages: Vec<Box<dyn ContextStage>>,
}

impl PipelineRunner {
    /// Create an empty runner.
    #[must_use]
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Add a stage, keeping the list ordered by layer index.
    pub fn add_stage(&mut self, stage: Box<dyn ContextStage>) {
        self.stages.push(stage);
        self.stages.sort_by_key(|s| s.layer_index());
    }

    /// Number of registered stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the runner has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage against the context, collecting contributions.
    pub async fn run(&self, context: &StageContext) -> Vec<StageOutput> {
        let mut outputs = Vec::new();

        for stage in &self.stages {
            match tokio::time::timeout(stage.timeout_budget(), stage.process(context)).await {
                Ok(Some(output)) => {
                    tracing::info!(
                        stage = stage.name(),
                        layer = stage.layer_index(),
                        rules = output.rules.len(),
                        "Stage contributed rules"
                    );
                    outputs.push(output);
                }
                Ok(None) => {
                    tracing::debug!(stage = stage.name(), "Stage opted out");
                }
                Err(_) => {
                    tracing::warn!(
                        stage = stage.name(),
                        budget = ?stage.timeout_budget(),
                        "Stage exceeded its timeout budget, skipping"
                    );
                }
            }
        }

        outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{StageMetadata, StageOutput};
    use async_trait::async_trait;
    use std::time::Duration;

    struct FixedStage {
        name: &'static str,
        layer: u32,
        delay: Duration,
        output: Option<&'static str>,
    }

    #[async_trait]
    impl ContextStage for FixedStage {
        fn name(&self) -> &'static str {
            self.name
        }

        fn layer_index(&self) -> u32 {
            self.layer
        }

        fn timeout_budget(&self) -> Duration {
            Duration::from_millis(50)
        }

        async fn process(&self, _context: &StageContext) -> Option<StageOutput> {
            tokio::time::sleep(self.delay).await;
            self.output.map(|rule| StageOutput {
                rules: vec![rule.to_string()],
                metadata: StageMetadata {
                    layer: self.layer,
                    agent: "dev".to_string(),
                    briefs: Vec::new(),
                    count: 1,
                },
            })
        }
    }

    #[tokio::test]
    async fn test_runner_orders_by_layer() {
        let mut runner = PipelineRunner::new();
        runner.add_stage(Box::new(FixedStage {
            name: "late",
            layer: 9,
            delay: Duration::ZERO,
            output: Some("second"),
        }));
        runner.add_stage(Box::new(FixedStage {
            name: "early",
            layer: 1,
            delay: Duration::ZERO,
            output: Some("first"),
        }));

        let outputs = runner.run(&StageContext::default()).await;

        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].rules, vec!["first"]);
        assert_eq!(outputs[1].rules, vec!["second"]);
    }

    #[tokio::test]
    async fn test_runner_skips_opted_out_stage() {
        let mut runner = PipelineRunner::new();
        runner.add_stage(Box::new(FixedStage {
            name: "silent",
            layer: 1,
            delay: Duration::ZERO,
            output: None,
        }));
        runner.add_stage(Box::new(FixedStage {
            name: "talkative",
            layer: 2,
            delay: Duration::ZERO,
            output: Some("rule"),
        }));

        let outputs = runner.run(&StageContext::default()).await;

        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].rules, vec!["rule"]);
    }

    #[tokio::test]
    async fn test_runner_skips_overrunning_stage() {
        let mut runner = PipelineRunner::new();
        runner.add_stage(Box::new(FixedStage {
            name: "slow",
            layer: 1,
            delay: Duration::from_millis(200),
            output: Some("never emitted"),
        }));
        runner.add_stage(Box::new(FixedStage {
            name: "fast",
            layer: 2,
            delay: Duration::ZERO,
            output: Some("emitted"),
        }));

        let outputs = runner.run(&StageContext::default()).await;

        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].rules, vec!["emitted"]);
    }

    #[tokio::test]
    async fn test_runner_empty() {
        let runner = PipelineRunner::new();
        assert!(runner.is_empty());
        assert_eq!(runner.len(), 0);
        assert!(runner.run(&StageContext::default()).await.is_empty());
    }
}
