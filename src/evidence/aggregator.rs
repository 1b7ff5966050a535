//! Evidence probes and their aggregation.
//!
//! Five independent read-only signals per (agent, domain): registry
//! coverage, recorded gotchas, completed stories, brief existence and
//! staleness. Absence of any source yields that probe's neutral default.

use chrono::{DateTime, Utc};

use super::matcher::{DomainMatcher, SubstringMatcher};
use super::read;
use super::types::{CoverageThresholds, DomainEvidence, EvidenceSources, RegistryCoverage};

/// Penalty once the last assessment is older than 30 days.
const STALE_PENALTY: f64 = -0.05;
/// Penalty once the last assessment is older than 90 days.
const VERY_STALE_PENALTY: f64 = -0.15;
const STALE_AFTER_DAYS: i64 = 30;
const VERY_STALE_AFTER_DAYS: i64 = 90;

/// Gathers `DomainEvidence` snapshots from the evidence sources.
pub struct EvidenceAggregator {
    sources: EvidenceSources,
    thresholds: CoverageThresholds,
    matcher: Box<dyn DomainMatcher>,
}

impl EvidenceAggregator {
    /// Create an aggregator over the given sources with the default
    /// substring matcher and coverage thresholds.
    #[must_use]
    pub fn new(sources: EvidenceSources) -> Self {
        Self {
            sources,
            thresholds: CoverageThresholds::default(),
            matcher: Box::new(SubstringMatcher),
        }
    }

    /// Use custom coverage thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: CoverageThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Use a custom matching strategy.
    #[must_use]
    pub fn with_matcher(mut self, matcher: Box<dyn DomainMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Get the evidence source locations.
    #[must_use]
    pub fn sources(&self) -> &EvidenceSources {
        &self.sources
    }

    /// Gather a full evidence snapshot for an (agent, domain) pair.
    ///
    /// Never fails: each probe substitutes its neutral default when its
    /// source is missing, unreadable or malformed.
    pub async fn gather(
        &self,
        agent: &str,
        domain: &str,
        last_updated: Option<DateTime<Utc>>,
    ) -> DomainEvidence {
        let keywords = self.matcher.keywords(domain);

        DomainEvidence {
            registry_coverage: self.registry_coverage(&keywords).await,
            gotcha_count: self.gotcha_count(&keywords).await,
            completed_story_count: self.completed_story_count(agent, &keywords).await,
            has_brief: self.has_brief(agent, domain).await,
            staleness_penalty: staleness_penalty(last_updated, Utc::now()),
        }
    }

    /// Count keyword hits across the coverage index, capped per keyword.
    async fn registry_coverage(&self, keywords: &[String]) -> RegistryCoverage {
        let Some(text) = read::read_text(self.sources.registry_path()).await else {
            return RegistryCoverage::default();
        };

        let depth: usize = keywords
            .iter()
            .map(|keyword| {
                self.matcher
                    .count(&text, keyword)
                    .min(self.thresholds.per_keyword_cap)
            })
            .sum();

        RegistryCoverage {
            covered: depth >= self.thresholds.covered_threshold,
            depth,
        }
    }

    /// Count mistake-log records whose serialized text mentions any keyword.
    async fn gotcha_count(&self, keywords: &[String]) -> usize {
        let Some(value) = read::read_json(self.sources.gotchas_path()).await else {
            return 0;
        };
        let Some(records) = value.as_array() else {
            tracing::debug!("Gotcha log is not a list");
            return 0;
        };

        records
            .iter()
            .filter(|record| self.matcher.contains_any(&record.to_string(), keywords))
            .count()
    }

    /// Count completed-work documents mentioning both the agent and a keyword.
    async fn completed_story_count(&self, agent: &str, keywords: &[String]) -> usize {
        let mention = format!("@{agent}");
        let mut count = 0;

        for path in read::list_dir(self.sources.stories_dir()).await {
            let Some(text) = read::read_text(&path).await else {
                continue;
            };
            if self.matcher.count(&text, &mention) > 0 && self.matcher.contains_any(&text, keywords)
            {
                count += 1;
            }
        }

        count
    }

    /// Whether the brief repository lists a file for this (agent, domain).
    async fn has_brief(&self, agent: &str, domain: &str) -> bool {
        let prefix = format!("{agent}-");

        read::list_dir(self.sources.briefs_dir())
            .await
            .iter()
            .any(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix) && name.contains(domain))
            })
    }
}

/// Penalty derived from the age of the last scored assessment.
///
/// No timestamp means no score exists yet to penalize. The 90-day branch is
/// checked first: it is the stricter, higher-penalty one and also satisfies
/// the 30-day check.
#[must_use]
pub fn staleness_penalty(last_updated: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(updated) = last_updated else {
        return 0.0;
    };
    let age_days = now.signed_duration_since(updated).num_days();
    if age_days > VERY_STALE_AFTER_DAYS {
        VERY_STALE_PENALTY
    } else if age_days > STALE_AFTER_DAYS {
        STALE_PENALTY
    } else {
        0.0
    }
}
