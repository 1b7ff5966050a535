//! Descriptor and severity band tables.
//!
//! The two tables are tuned independently and intentionally do not align
//! (a score can sit near one descriptor band yet carry a different
//! severity). Keep them as separate lookups; neither derives from the
//! other.

use serde::{Deserialize, Serialize};

/// Qualitative proficiency descriptor, ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Descriptor {
    Desconhecido,
    #[serde(rename = "Crítico")]
    Critico,
    #[serde(rename = "Lacuna significativa")]
    LacunaSignificativa,
    Lacuna,
    #[serde(rename = "Aceitável")]
    Aceitavel,
    Adequado,
    Proficiente,
    Expert,
}

impl Descriptor {
    /// First matching band, checked in descending order.
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score >= 0.90 {
            Self::Expert
        } else if score >= 0.80 {
            Self::Proficiente
        } else if score >= 0.70 {
            Self::Adequado
        } else if score >= 0.60 {
            Self::Aceitavel
        } else if score >= 0.45 {
            Self::Lacuna
        } else if score >= 0.30 {
            Self::LacunaSignificativa
        } else if score >= 0.10 {
            Self::Critico
        } else {
            Self::Desconhecido
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Desconhecido => "Desconhecido",
            Self::Critico => "Crítico",
            Self::LacunaSignificativa => "Lacuna significativa",
            Self::Lacuna => "Lacuna",
            Self::Aceitavel => "Aceitável",
            Self::Adequado => "Adequado",
            Self::Proficiente => "Proficiente",
            Self::Expert => "Expert",
        }
    }
}

impl std::fmt::Display for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a proficiency gap, ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Ok,
}

impl Severity {
    /// Band lookup, tuned separately from the descriptor table.
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score < 0.30 {
            Self::Critical
        } else if score < 0.50 {
            Self::High
        } else if score < 0.60 {
            Self::Medium
        } else {
            Self::Ok
        }
    }

    /// Lowercase label as it appears on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Ok => "ok",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
