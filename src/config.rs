use crate::error::{Error, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub lookback_days: u32,
    pub max_events: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GITHUB_TOKEN")
            .map_err(|_| Error::Config("GITHUB_TOKEN environment variable not set".to_string()))?;

        let lookback_days = env::var("ANALYSIS_LOOKBACK_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(90);

        let max_events = env::var("MAX_EVENTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300);

        Ok(Self {
            github_token,
            lookback_days,
            max_events,
        })
    }
}

/// Thresholds and window limits consumed by the analysis stages.
///
/// Built once at startup, validated before the pipeline runs, and passed
/// into each component at construction. Every numeric here is a tunable
/// default, not a contract; see `Default` for the documented values.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Lookback window length in days.
    pub lookback_days: u32,
    /// Maximum number of activity records kept in the window.
    pub max_events: usize,
    /// How many peak hours to surface.
    pub peak_hour_count: usize,
    /// How many event types make the headline distribution.
    pub top_event_types: usize,
    /// Ascending commit cutoffs for intermediate / advanced / expert.
    pub expertise_commit_cutoffs: [u64; 3],
    /// Ascending active-day cutoffs for intermediate / advanced / expert.
    pub expertise_day_cutoffs: [u64; 3],
    /// Minimum share of language-attributed events for a specialization.
    pub specialization_confidence: f64,
    /// Collaboration ratio below which the style is solo.
    pub collaboration_occasional: f64,
    /// Collaboration ratio at or above which the style is frequent.
    pub collaboration_frequent: f64,
    /// Relative margin separating a stable trend from a moving one.
    pub trend_margin: f64,
    /// Weight applied to records in the most recent third of the window.
    pub recency_weight: f64,
    /// Minimum events before category insights are emitted.
    pub min_insight_events: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            lookback_days: 90,
            max_events: 300,
            peak_hour_count: 3,
            top_event_types: 5,
            expertise_commit_cutoffs: [10, 50, 150],
            expertise_day_cutoffs: [3, 10, 30],
            specialization_confidence: 0.20,
            collaboration_occasional: 0.10,
            collaboration_frequent: 0.30,
            trend_margin: 0.15,
            recency_weight: 2.0,
            min_insight_events: 5,
        }
    }
}

impl AnalysisConfig {
    /// Rejects configurations that would silently misclassify.
    pub fn validate(&self) -> Result<()> {
        if self.lookback_days == 0 {
            return Err(Error::Config("lookback_days must be at least 1".to_string()));
        }
        if self.max_events == 0 {
            return Err(Error::Config("max_events must be at least 1".to_string()));
        }
        if self.peak_hour_count == 0 || self.top_event_types == 0 {
            return Err(Error::Config(
                "peak_hour_count and top_event_types must be at least 1".to_string(),
            ));
        }
        if !strictly_increasing(&self.expertise_commit_cutoffs) {
            return Err(Error::Config(
                "expertise_commit_cutoffs must be strictly increasing".to_string(),
            ));
        }
        if !strictly_increasing(&self.expertise_day_cutoffs) {
            return Err(Error::Config(
                "expertise_day_cutoffs must be strictly increasing".to_string(),
            ));
        }
        if !(self.specialization_confidence > 0.0 && self.specialization_confidence <= 1.0) {
            return Err(Error::Config(
                "specialization_confidence must be in (0, 1]".to_string(),
            ));
        }
        if !(self.collaboration_occasional > 0.0
            && self.collaboration_occasional < self.collaboration_frequent
            && self.collaboration_frequent <= 1.0)
        {
            return Err(Error::Config(
                "collaboration thresholds must satisfy 0 < occasional < frequent <= 1".to_string(),
            ));
        }
        if self.trend_margin < 0.0 {
            return Err(Error::Config("trend_margin must be non-negative".to_string()));
        }
        if self.recency_weight < 1.0 {
            return Err(Error::Config("recency_weight must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl From<&Config> for AnalysisConfig {
    fn from(config: &Config) -> Self {
        Self {
            lookback_days: config.lookback_days,
            max_events: config.max_events,
            ..Default::default()
        }
    }
}

fn strictly_increasing(cutoffs: &[u64; 3]) -> bool {
    cutoffs[0] < cutoffs[1] && cutoffs[1] < cutoffs[2]
}
