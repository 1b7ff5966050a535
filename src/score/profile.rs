//! Persisted per-agent assessment profile.
//!
//! The profile records which domains an agent has been assessed on and
//! when. The calculator only reads it; the reassessment scheduler owns the
//! writes.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One domain's persisted assessment state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEntry {
    /// When this domain was last scored, if ever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    /// Last persisted score, opaque to the calculator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Map of domain identifier to its persisted assessment state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentProfile {
    /// Domain keys in deterministic order.
    pub domains: BTreeMap<String, ProfileEntry>,
}

/// Errors from profile operations.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to read profile {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("Failed to parse profile {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl AgentProfile {
    /// Load a profile from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` if the file cannot be read or parsed. A
    /// missing file is not special-cased here: the caller decides whether
    /// an agent without a profile is an error or an empty profile.
    pub async fn load(path: &Path) -> Result<Self, ProfileError> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ProfileError::ReadError {
                    path: path.to_path_buf(),
                    source,
                })?;

        serde_json::from_str(&content).map_err(|source| ProfileError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Number of domains on record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Whether the profile has no domains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
