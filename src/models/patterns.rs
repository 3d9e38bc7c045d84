use serde::Serialize;

use super::activity::EventKind;

/// Aggregate statistics derived once per run from the analysis window
/// and the account's repository list. Every counter has a zero-valued
/// default so an empty window produces a fully-defaulted value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatternStatistics {
    pub time: TimePatterns,
    pub activity: ActivityPatterns,
    pub language: LanguagePatterns,
    pub repository: RepositoryPatterns,
    pub collaboration: CollaborationPatterns,
    pub productivity: ProductivityMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimePatterns {
    /// Event counts per hour of day, UTC.
    pub hour_histogram: [u64; 24],
    /// Event counts per weekday, Sunday = index 0.
    pub weekday_histogram: [u64; 7],
    /// Top hours by count; ties go to the earlier hour.
    pub peak_hours: Vec<HourCount>,
    /// Weekday name with the most events; ties go to the earliest index.
    pub most_active_day: Option<String>,
}

impl Default for TimePatterns {
    fn default() -> Self {
        Self {
            hour_histogram: [0; 24],
            weekday_histogram: [0; 7],
            peak_hours: Vec::new(),
            most_active_day: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourCount {
    pub hour: u8,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityPatterns {
    /// Absolute counts per event kind, in first-seen order.
    pub distribution: Vec<EventTypeCount>,
    /// Headline: top kinds by count, ties broken by first-seen order.
    pub top_event_types: Vec<EventTypeCount>,
    pub distinct_event_types: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventTypeCount {
    pub kind: EventKind,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LanguagePatterns {
    /// Counts over records with an identifiable repository language,
    /// in first-seen order. Unknown languages are excluded entirely.
    pub distribution: Vec<LanguageCount>,
    pub primary_language: Option<String>,
    pub distinct_languages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageCount {
    pub language: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepositoryPatterns {
    pub total_repositories: usize,
    pub total_stars: u64,
    pub total_forks: u64,
    pub average_stars: f64,
    pub most_starred: Option<RepositoryHighlight>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryHighlight {
    pub name: String,
    pub stars: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollaborationPatterns {
    pub pull_requests_opened: u64,
    pub pull_requests_participated: u64,
    pub issues_opened: u64,
    pub issues_participated: u64,
}

impl CollaborationPatterns {
    pub fn total(&self) -> u64 {
        self.pull_requests_opened
            + self.pull_requests_participated
            + self.issues_opened
            + self.issues_participated
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductivityMetrics {
    pub total_events: u64,
    /// Distinct calendar days with at least one record.
    pub active_days: u64,
    /// Events per day over the lookback period, not per active day.
    pub daily_average_events: f64,
    /// Count of push-type records in the window.
    pub total_commits: u64,
    pub commits_per_day: f64,
}
