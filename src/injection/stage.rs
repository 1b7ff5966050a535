//! Knowledge injection pipeline stage.
//!
//! Loads the pending-brief queue, filters it for the active agent, and
//! renders a bounded context injection. Every non-applicable path is a
//! silent no-op: this stage must never be the reason a turn fails.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::agent::AgentDetector;
use crate::evidence::read;
use crate::pipeline::{ContextStage, StageContext, StageMetadata, StageOutput};

use super::queue::{load_queue, KnowledgeQueueEntry};

/// Queue file location under the synapse root.
const QUEUE_FILE: &str = "queue/knowledge-queue.json";

/// Pipeline stage that splices pending knowledge briefs into the active
/// agent's working context.
pub struct KnowledgeInjectionStage {
    detector: AgentDetector,
    max_brief_chars: usize,
    timeout_budget: Duration,
}

impl KnowledgeInjectionStage {
    /// Stage name as reported to the runner.
    pub const NAME: &'static str = "knowledge-injection";
    /// Layer position in the context-assembly pipeline.
    pub const LAYER: u32 = 5;
    /// Default character budget per injected brief body.
    pub const DEFAULT_BRIEF_BUDGET: usize = 3000;
    /// Default timeout budget.
    const DEFAULT_TIMEOUT: Duration = Duration::from_millis(20);

    /// Create the stage with default budgets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            detector: AgentDetector::new(),
            max_brief_chars: Self::DEFAULT_BRIEF_BUDGET,
            timeout_budget: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-brief character budget.
    #[must_use]
    pub fn with_brief_budget(mut self, max_chars: usize) -> Self {
        self.max_brief_chars = max_chars;
        self
    }

    /// Override the timeout budget declared to the runner.
    #[must_use]
    pub fn with_timeout_budget(mut self, budget: Duration) -> Self {
        self.timeout_budget = budget;
        self
    }
}

impl Default for KnowledgeInjectionStage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContextStage for KnowledgeInjectionStage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn layer_index(&self) -> u32 {
        Self::LAYER
    }

    fn timeout_budget(&self) -> Duration {
        self.timeout_budget
    }

    async fn process(&self, context: &StageContext) -> Option<StageOutput> {
        let synapse_path = context.config.synapse_path.as_ref()?;
        let agent = self.detector.detect(&context.session, &context.prompt)?;

        let queue_path = synapse_path.join(QUEUE_FILE);
        let entries = load_queue(&queue_path).await?;

        let now = Utc::now();
        let matching: Vec<&KnowledgeQueueEntry> = entries
            .iter()
            .filter(|entry| entry.matches(&agent) && entry.is_live(now))
            .collect();

        if matching.is_empty() {
            tracing::debug!(agent = %agent, "No pending briefs for agent");
            return None;
        }

        let mut rules = Vec::new();
        let mut briefs = Vec::new();

        for entry in matching {
            let Some(brief_path) = entry.brief_path.as_deref() else {
                tracing::debug!("Queue entry has no brief path, skipping");
                continue;
            };
            let resolved = resolve_brief_path(&queue_path, brief_path);
            let Some(body) = read::read_text(&resolved).await else {
                tracing::warn!(path = %resolved.display(), "Failed to load brief, skipping entry");
                continue;
            };

            let name = brief_name(&resolved);
            let body = truncate_brief(&body, self.max_brief_chars, &resolved);
            rules.push(format!("[KNOWLEDGE GAP @{agent} :: {name}]\n{body}"));
            briefs.push(name);
        }

        if briefs.is_empty() {
            tracing::debug!(agent = %agent, "No briefs could be loaded");
            return None;
        }

        rules.push(format!(
            "@{agent}: consult the knowledge gaps listed above ({}) before deciding how to proceed.",
            briefs.join(", ")
        ));

        let count = briefs.len();
        tracing::info!(agent = %agent, count, "Injecting knowledge briefs");

        Some(StageOutput {
            rules,
            metadata: StageMetadata {
                layer: Self::LAYER,
                agent,
                briefs,
                count,
            },
        })
    }
}

/// Absolute brief paths are used verbatim; relative ones resolve against
/// the base two levels above the queue file.
fn resolve_brief_path(queue_path: &Path, brief_path: &str) -> PathBuf {
    let path = Path::new(brief_path);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    queue_path
        .parent()
        .and_then(Path::parent)
        .unwrap_or(Path::new("."))
        .join(path)
}

/// Display name of a brief: its filename, or the whole path when the path
/// has no final component.
fn brief_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| {
            name.to_string_lossy().into_owned()
        })
}

/// Cut a brief body to the character budget, appending a notice naming the
/// full file when truncated. Bodies within budget pass through unchanged.
fn truncate_brief(body: &str, max_chars: usize, source: &Path) -> String {
    if body.chars().count() <= max_chars {
        return body.to_string();
    }
    let cut: String = body.chars().take(max_chars).collect();
    format!(
        "{cut}\n\n[Brief truncated at {max_chars} characters. Consult the full file: {}]",
        source.display()
    )
}
