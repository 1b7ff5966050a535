//! Evidence snapshot types and source locations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Registry coverage signal for a domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryCoverage {
    /// Whether the domain counts as covered by the registry.
    pub covered: bool,
    /// Summed keyword hit count, capped per keyword.
    pub depth: usize,
}

/// Per (agent, domain) evidence snapshot.
///
/// Every field is independently computable; a missing or unreadable source
/// yields that probe's neutral default, never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEvidence {
    /// Coverage index signal.
    pub registry_coverage: RegistryCoverage,
    /// Mistakes on record mentioning the domain.
    pub gotcha_count: usize,
    /// Finished work items mentioning both agent and domain.
    pub completed_story_count: usize,
    /// Whether a knowledge brief exists for this (agent, domain).
    pub has_brief: bool,
    /// One of 0.0, -0.05 or -0.15, from the age of the last assessment.
    pub staleness_penalty: f64,
}

/// Thresholds for the registry coverage probe.
///
/// Generous defaults: substring hits are a loose proxy for "this domain is
/// documented somewhere", and the per-keyword cap stops one frequent token
/// from dominating the depth sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageThresholds {
    /// Maximum contribution of a single keyword to the depth sum.
    pub per_keyword_cap: usize,
    /// Minimum summed depth for the domain to count as covered.
    pub covered_threshold: usize,
}

impl Default for CoverageThresholds {
    fn default() -> Self {
        Self {
            per_keyword_cap: 5,
            covered_threshold: 3,
        }
    }
}

/// Locations of the externally-owned evidence sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceSources {
    registry_path: PathBuf,
    gotchas_path: PathBuf,
    stories_dir: PathBuf,
    briefs_dir: PathBuf,
}

impl EvidenceSources {
    /// Conventional layout under a synapse root directory.
    #[must_use]
    pub fn from_root(root: &Path) -> Self {
        Self {
            registry_path: root.join("registry.md"),
            gotchas_path: root.join("gotchas.json"),
            stories_dir: root.join("stories"),
            briefs_dir: root.join("briefs"),
        }
    }

    /// Override the coverage index location.
    #[must_use]
    pub fn with_registry_path(mut self, path: PathBuf) -> Self {
        self.registry_path = path;
        self
    }

    /// Override the mistake log location.
    #[must_use]
    pub fn with_gotchas_path(mut self, path: PathBuf) -> Self {
        self.gotchas_path = path;
        self
    }

    /// Override the completed-work directory.
    #[must_use]
    pub fn with_stories_dir(mut self, path: PathBuf) -> Self {
        self.stories_dir = path;
        self
    }

    /// Override the brief repository directory.
    #[must_use]
    pub fn with_briefs_dir(mut self, path: PathBuf) -> Self {
        self.briefs_dir = path;
        self
    }

    /// Path of the coverage index text blob.
    #[must_use]
    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    /// Path of the serialized mistake log.
    #[must_use]
    pub fn gotchas_path(&self) -> &Path {
        &self.gotchas_path
    }

    /// Directory of completed-work documents.
    #[must_use]
    pub fn stories_dir(&self) -> &Path {
        &self.stories_dir
    }

    /// Directory whose filenames encode `{agent}-...{domain}...`.
    #[must_use]
    pub fn briefs_dir(&self) -> &Path {
        &self.briefs_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_thresholds_defaults() {
        let thresholds = CoverageThresholds::default();
        assert_eq!(thresholds.per_keyword_cap, 5);
        assert_eq!(thresholds.covered_threshold, 3);
    }

    #[test]
    fn test_sources_from_root() {
        let sources = EvidenceSources::from_root(Path::new("/tmp/synapse"));
        assert_eq!(sources.registry_path(), Path::new("/tmp/synapse/registry.md"));
        assert_eq!(sources.gotchas_path(), Path::new("/tmp/synapse/gotchas.json"));
        assert_eq!(sources.stories_dir(), Path::new("/tmp/synapse/stories"));
        assert_eq!(sources.briefs_dir(), Path::new("/tmp/synapse/briefs"));
    }

    #[test]
    fn test_sources_overrides() {
        let sources = EvidenceSources::from_root(Path::new("/tmp/synapse"))
            .with_registry_path(PathBuf::from("/elsewhere/index.md"))
            .with_briefs_dir(PathBuf::from("/elsewhere/briefs"));
        assert_eq!(sources.registry_path(), Path::new("/elsewhere/index.md"));
        assert_eq!(sources.briefs_dir(), Path::new("/elsewhere/briefs"));
        assert_eq!(sources.stories_dir(), Path::new("/tmp/synapse/stories"));
    }

    #[test]
    fn test_evidence_default_is_neutral() {
        let evidence = DomainEvidence::default();
        assert!(!evidence.registry_coverage.covered);
        assert_eq!(evidence.registry_coverage.depth, 0);
        assert_eq!(evidence.gotcha_count, 0);
        assert_eq!(evidence.completed_story_count, 0);
        assert!(!evidence.has_brief);
        assert_eq!(evidence.staleness_penalty, 0.0);
    }

    #[test]
    fn test_evidence_serializes_camel_case() {
        let evidence = DomainEvidence::default();
        let json = serde_json::to_string(&evidence).unwrap();
        assert!(json.contains("registryCoverage"));
        assert!(json.contains("gotchaCount"));
        assert!(json.contains("completedStoryCount"));
        assert!(json.contains("hasBrief"));
        assert!(json.contains("stalenessPenalty"));
    }
}
