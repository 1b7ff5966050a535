//! Evidence-based proficiency score calculation.
//!
//! Combines a `DomainEvidence` snapshot into one bounded score via additive
//! weighted rules, a staleness penalty and a confidence cap, then
//! classifies the score into a descriptor and a severity band. This is an
//! explicit heuristic policy, not a calibrated probability model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::evidence::{DomainEvidence, EvidenceAggregator};

use super::bands::{Descriptor, Severity};
use super::profile::AgentProfile;

/// Additive weights for the score rules.
///
/// The counts behind each rule only matter up to its threshold: one
/// recorded gotcha weighs the same as fifty. Presence of a
/// self-correction signal, not its magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Added when the registry covers the domain.
    pub covered: f64,
    /// Added on top of `covered` at deep registry coverage.
    pub deep_coverage: f64,
    /// Depth at which coverage counts as deep.
    pub deep_coverage_depth: usize,
    /// Added when any gotcha is on record.
    pub gotchas: f64,
    /// Added when a knowledge brief exists.
    pub brief: f64,
    /// Added at one or more completed stories.
    pub stories: f64,
    /// Added again (stacking) at `stories_stacking_at` stories.
    pub stories_stacking: f64,
    /// Story count at which the stacking bonus applies.
    pub stories_stacking_at: usize,
    /// Scores above this without a dated assessment get capped.
    pub confidence_cap_above: f64,
    /// The capped value.
    pub confidence_cap: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            covered: 0.20,
            deep_coverage: 0.15,
            deep_coverage_depth: 10,
            gotchas: 0.10,
            brief: 0.15,
            stories: 0.10,
            stories_stacking: 0.10,
            stories_stacking_at: 3,
            confidence_cap_above: 0.60,
            confidence_cap: 0.55,
        }
    }
}

/// Caller-supplied hints for a score computation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreHints {
    /// Timestamp of the last scored assessment, when the caller already
    /// holds it from persisted state.
    pub last_updated: Option<DateTime<Utc>>,
}

/// A computed proficiency score. Immutable once created; callers persist
/// it externally if they want history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Bounded score in [0.0, 1.0], rounded to 2 decimals.
    pub score: f64,
    /// The evidence snapshot the score was derived from.
    pub evidence: DomainEvidence,
    /// Qualitative band.
    pub descriptor: Descriptor,
    /// Severity band, looked up independently of the descriptor.
    pub severity: Severity,
}

/// Computes proficiency scores for (agent, domain) pairs.
pub struct ScoreCalculator {
    aggregator: EvidenceAggregator,
    weights: ScoreWeights,
}

impl ScoreCalculator {
    /// Create a calculator over an evidence aggregator with default weights.
    #[must_use]
    pub fn new(aggregator: EvidenceAggregator) -> Self {
        Self {
            aggregator,
            weights: ScoreWeights::default(),
        }
    }

    /// Use custom weights.
    #[must_use]
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Get the active weights.
    #[must_use]
    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Compute the proficiency score for an (agent, domain) pair.
    pub async fn score(&self, agent: &str, domain: &str, hints: ScoreHints) -> ScoreResult {
        let evidence = self
            .aggregator
            .gather(agent, domain, hints.last_updated)
            .await;
        let result = self.combine(evidence, hints.last_updated.is_some());
        tracing::debug!(
            agent = %agent,
            domain = %domain,
            score = result.score,
            descriptor = %result.descriptor,
            severity = %result.severity,
            "Computed proficiency score"
        );
        result
    }

    /// Compute scores for every domain in the agent's profile, sourcing
    /// each domain's `last_updated` hint from the profile entry.
    pub async fn score_all(
        &self,
        agent: &str,
        profile: &AgentProfile,
    ) -> BTreeMap<String, ScoreResult> {
        let mut results = BTreeMap::new();
        for (domain, entry) in &profile.domains {
            let hints = ScoreHints {
                last_updated: entry.last_updated,
            };
            results.insert(domain.clone(), self.score(agent, domain, hints).await);
        }
        results
    }

    /// Pure combine step: evidence in, classified score out.
    ///
    /// Classification reads the unrounded clamped value; rounding happens
    /// last so band comparisons never see a rounded-up score.
    #[must_use]
    pub fn combine(&self, evidence: DomainEvidence, has_assessment_date: bool) -> ScoreResult {
        let w = &self.weights;
        let mut raw = 0.0;

        if evidence.registry_coverage.covered {
            raw += w.covered;
        }
        if evidence.registry_coverage.depth >= w.deep_coverage_depth {
            raw += w.deep_coverage;
        }
        if evidence.gotcha_count > 0 {
            raw += w.gotchas;
        }
        if evidence.has_brief {
            raw += w.brief;
        }
        if evidence.completed_story_count >= 1 {
            raw += w.stories;
        }
        if evidence.completed_story_count >= w.stories_stacking_at {
            raw += w.stories_stacking;
        }
        raw += evidence.staleness_penalty;

        let clamped = raw.clamp(0.0, 1.0);

        // A high score computed with zero knowledge of recency is
        // untrustworthy: without a dated assessment trail the score is
        // capped below the proficient bands.
        let value = if !has_assessment_date && clamped > w.confidence_cap_above {
            tracing::debug!(clamped, capped = w.confidence_cap, "Applied confidence cap");
            w.confidence_cap
        } else {
            clamped
        };

        ScoreResult {
            score: (value * 100.0).round() / 100.0,
            descriptor: Descriptor::for_score(value),
            severity: Severity::for_score(value),
            evidence,
        }
    }
}
