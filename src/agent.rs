//! Active-agent resolution.
//!
//! Resolves which agent a turn belongs to, either from session state or
//! from the first `@agent` mention in the incoming prompt. First match
//! wins; candidates are never merged.

use regex::Regex;

use crate::pipeline::SessionState;

/// Detects the active agent for a pipeline turn.
#[derive(Debug, Clone)]
pub struct AgentDetector {
    mention: Option<Regex>,
}

impl AgentDetector {
    /// Mention pattern: `@` followed by a lowercase letter, then word
    /// characters or hyphens.
    const MENTION_PATTERN: &'static str = r"@([a-z][\w-]*)";

    /// Create a detector with the standard mention pattern.
    #[must_use]
    pub fn new() -> Self {
        let mention = match Regex::new(Self::MENTION_PATTERN) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to compile mention pattern");
                None
            }
        };
        Self { mention }
    }

    /// Resolve the active agent from session state, falling back to the
    /// first mention in the prompt. Returns `None` when neither applies.
    #[must_use]
    pub fn detect(&self, session: &SessionState, prompt: &str) -> Option<String> {
        if let Some(agent) = &session.active_agent {
            if !agent.is_empty() {
                return Some(agent.clone());
            }
        }

        self.mention
            .as_ref()?
            .captures(prompt)
            .map(|captures| captures[1].to_string())
    }
}

impl Default for AgentDetector {
    fn default() -> Self {
        Self::new()
    }
}
