use chrono::{DateTime, Utc};
use serde::Serialize;

use super::account::Profile;
use super::labels::ProfileLabels;
use super::patterns::PatternStatistics;

/// The single structured hand-off to the renderer. Field names and
/// nesting are the compatibility surface consumed by presentation code.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityReport {
    pub profile: Profile,
    pub patterns: PatternStatistics,
    pub labels: ProfileLabels,
    pub summary: String,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Ordered insight and recommendation strings; insertion order is the
/// presentation order, most important first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightSet {
    pub summary: String,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}
