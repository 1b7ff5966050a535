//! Context bundle handed to every pipeline stage.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Session state as the orchestrator serializes it.
///
/// Both `activeAgent` and `active_agent` spellings appear in the wild;
/// both are honored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// The agent the session is currently operating as, if any.
    #[serde(
        rename = "activeAgent",
        alias = "active_agent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub active_agent: Option<String>,
}

/// Stage configuration from the surrounding pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Root of the synapse directory holding the knowledge queue. Absent
    /// when the project has no synapse installation.
    #[serde(
        rename = "synapsePath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub synapse_path: Option<PathBuf>,
}

/// One turn's input to the context-assembly pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageContext {
    /// The incoming prompt text.
    #[serde(default)]
    pub prompt: String,
    /// Session state.
    #[serde(default)]
    pub session: SessionState,
    /// Pipeline configuration.
    #[serde(default)]
    pub config: StageConfig,
}
