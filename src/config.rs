//! Configuration types and file loader.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::evidence::{CoverageThresholds, EvidenceSources};
use crate::injection::KnowledgeInjectionStage;
use crate::score::ScoreWeights;

/// Top-level configuration, loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Root of the synapse directory.
    pub synapse_root: PathBuf,
    /// Coverage index override; relative paths resolve against the root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_file: Option<PathBuf>,
    /// Mistake log override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gotchas_file: Option<PathBuf>,
    /// Completed-work directory override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stories_dir: Option<PathBuf>,
    /// Brief repository override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub briefs_dir: Option<PathBuf>,
    /// Directory of per-agent profile files, relative to the root.
    pub profiles_dir: PathBuf,
    /// Score rule weights.
    pub weights: ScoreWeights,
    /// Registry coverage thresholds.
    pub coverage: CoverageThresholds,
    /// Character budget per injected brief.
    pub brief_budget: usize,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            synapse_root: PathBuf::from(".synapse"),
            registry_file: None,
            gotchas_file: None,
            stories_dir: None,
            briefs_dir: None,
            profiles_dir: PathBuf::from("profiles"),
            weights: ScoreWeights::default(),
            coverage: CoverageThresholds::default(),
            brief_budget: KnowledgeInjectionStage::DEFAULT_BRIEF_BUDGET,
        }
    }
}

impl KnowledgeConfig {
    /// Evidence source locations, with any configured overrides applied.
    #[must_use]
    pub fn evidence_sources(&self) -> EvidenceSources {
        let mut sources = EvidenceSources::from_root(&self.synapse_root);
        if let Some(path) = &self.registry_file {
            sources = sources.with_registry_path(self.resolve(path));
        }
        if let Some(path) = &self.gotchas_file {
            sources = sources.with_gotchas_path(self.resolve(path));
        }
        if let Some(path) = &self.stories_dir {
            sources = sources.with_stories_dir(self.resolve(path));
        }
        if let Some(path) = &self.briefs_dir {
            sources = sources.with_briefs_dir(self.resolve(path));
        }
        sources
    }

    /// Path of an agent's profile file.
    #[must_use]
    pub fn profile_path(&self, agent: &str) -> PathBuf {
        self.resolve(&self.profiles_dir).join(format!("{agent}.json"))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.synapse_root.join(path)
        }
    }
}

/// Configuration loader that searches multiple locations.
#[derive(Debug)]
pub struct ConfigLoader {
    /// Search paths in order of priority.
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default search paths.
    #[must_use]
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        // 1. Current directory: .synapse-knowledge.toml
        search_paths.push(PathBuf::from(".synapse-knowledge.toml"));

        // 2. User config directory: ~/.config/synapse-knowledge/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            search_paths.push(config_dir.join("synapse-knowledge").join("config.toml"));
        }

        Self { search_paths }
    }

    /// Create a config loader with a specific config file path.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            search_paths: vec![path],
        }
    }

    /// Load configuration from the first available file, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    pub fn load(&self) -> Result<KnowledgeConfig, ConfigError> {
        for path in &self.search_paths {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading config file");
                return Self::load_from_path(path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(KnowledgeConfig::default())
    }

    fn load_from_path(path: &PathBuf) -> Result<KnowledgeConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the search paths for debugging.
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}
