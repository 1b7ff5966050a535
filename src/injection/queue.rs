//! Knowledge queue parsing and entry filtering.
//!
//! The queue is shared, externally-written state. This crate only ever
//! reads it: expiry is evaluated at read time, never enforced by deletion,
//! and a torn or malformed read degrades to "no queue".

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::evidence::read;

/// One pending brief-injection entry, scoped to a single agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeQueueEntry {
    /// Agent the brief is scoped to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    /// Brief location, absolute or relative to the synapse root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief_path: Option<String>,
    /// Expiry timestamp; the entry is inert once passed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl KnowledgeQueueEntry {
    /// Whether the entry targets the given agent.
    #[must_use]
    pub fn matches(&self, agent: &str) -> bool {
        self.agent.as_deref() == Some(agent)
    }

    /// Whether the entry is still live at `now`.
    ///
    /// Absent expiry means never expires; an unparsable expiry reads as
    /// already expired.
    #[must_use]
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        match &self.expires_at {
            None => true,
            Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                Ok(expires) => expires.with_timezone(&Utc) >= now,
                Err(e) => {
                    tracing::debug!(
                        expires_at = %raw,
                        error = %e,
                        "Unparsable expiry, treating entry as expired"
                    );
                    false
                }
            },
        }
    }
}

/// Load the queue: either a bare list of entries or an object wrapping the
/// list under a `queue` key. `None` when the file is unreadable or not a
/// recognized shape.
pub async fn load_queue(path: &Path) -> Option<Vec<KnowledgeQueueEntry>> {
    let value = read::read_json(path).await?;

    let list = match &value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(map) => map.get("queue")?.as_array()?,
        _ => {
            tracing::warn!(
                path = %path.display(),
                "Queue is neither a list nor an object with a queue field"
            );
            return None;
        }
    };

    let entries = list
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping malformed queue entry");
                None
            }
        })
        .collect();

    Some(entries)
}
