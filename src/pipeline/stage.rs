//! Stage contract for the context-assembly pipeline.
//!
//! A stage is any unit with a declared identity (name, layer position,
//! timeout budget) and a `process` that either contributes rules or opts
//! out with `None`. Stages compose via an ordered list processed by the
//! runner, never via subclass-style chaining.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::context::StageContext;

/// Metadata a stage reports alongside its rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageMetadata {
    /// Layer position of the emitting stage.
    pub layer: u32,
    /// Agent the rules are addressed to.
    pub agent: String,
    /// Identifiers of the briefs that were injected.
    pub briefs: Vec<String>,
    /// Number of injected blocks.
    pub count: usize,
}

/// Output of one stage invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageOutput {
    /// Ordered text blocks to splice into the agent's working context.
    pub rules: Vec<String>,
    /// Stage-reported metadata.
    pub metadata: StageMetadata,
}

/// One ordered, independently-timed unit of context assembly.
///
/// `process` must never fail: whenever the stage is not applicable it
/// returns `None` and the pipeline continues unaffected.
#[async_trait]
pub trait ContextStage: Send + Sync {
    /// Stage name for logs and metadata.
    fn name(&self) -> &'static str;

    /// Position in the ordered pipeline.
    fn layer_index(&self) -> u32;

    /// Per-invocation time budget enforced by the runner.
    fn timeout_budget(&self) -> Duration;

    /// Produce this stage's contribution, or `None` to opt out.
    async fn process(&self, context: &StageContext) -> Option<StageOutput>;
}
