use chrono::{Datelike, Timelike};
use std::collections::BTreeSet;

use crate::analysis::safe_ratio;
use crate::config::AnalysisConfig;
use crate::models::{
    ActivityPatterns, AnalysisWindow, CollaborationPatterns, EventKind, EventTypeCount, HourCount,
    LanguageCount, LanguagePatterns, PatternStatistics, ProductivityMetrics, RepositoryHighlight,
    RepositoryPatterns, RepositorySummary, TimePatterns,
};

/// Sunday = index 0, fixed for reproducibility.
const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Computes `PatternStatistics` from an analysis window plus the
/// account's repository list. Pure and total: missing optional fields
/// never raise, and every statistic has a zero-valued default, so the
/// empty window degenerates cleanly.
pub struct PatternAnalyzer {
    config: AnalysisConfig,
}

impl PatternAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn analyze(
        &self,
        window: &AnalysisWindow,
        repositories: &[RepositorySummary],
    ) -> PatternStatistics {
        PatternStatistics {
            time: self.time_patterns(window),
            activity: self.activity_patterns(window),
            language: self.language_patterns(window),
            repository: self.repository_patterns(repositories),
            collaboration: self.collaboration_patterns(window),
            productivity: self.productivity_metrics(window),
        }
    }

    fn time_patterns(&self, window: &AnalysisWindow) -> TimePatterns {
        let mut hour_histogram = [0u64; 24];
        let mut weekday_histogram = [0u64; 7];

        for record in window.records() {
            hour_histogram[record.occurred_at.hour() as usize] += 1;
            weekday_histogram[record.occurred_at.weekday().num_days_from_sunday() as usize] += 1;
        }

        // Top hours by count; the earlier hour wins a tie.
        let mut peak_hours: Vec<HourCount> = hour_histogram
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(hour, &count)| HourCount {
                hour: hour as u8,
                count,
            })
            .collect();
        peak_hours.sort_by(|a, b| b.count.cmp(&a.count).then(a.hour.cmp(&b.hour)));
        peak_hours.truncate(self.config.peak_hour_count);

        // Earliest weekday index wins a tie; strictly-greater keeps it.
        let mut most_active_day = None;
        let mut best = 0u64;
        for (index, &count) in weekday_histogram.iter().enumerate() {
            if count > best {
                best = count;
                most_active_day = Some(WEEKDAY_NAMES[index].to_string());
            }
        }

        TimePatterns {
            hour_histogram,
            weekday_histogram,
            peak_hours,
            most_active_day,
        }
    }

    fn activity_patterns(&self, window: &AnalysisWindow) -> ActivityPatterns {
        let mut distribution: Vec<EventTypeCount> = Vec::new();

        for record in window.records() {
            match distribution.iter_mut().find(|e| e.kind == record.kind) {
                Some(entry) => entry.count += 1,
                None => distribution.push(EventTypeCount {
                    kind: record.kind,
                    count: 1,
                }),
            }
        }

        // Stable sort keeps first-seen order between equal counts.
        let mut top_event_types = distribution.clone();
        top_event_types.sort_by(|a, b| b.count.cmp(&a.count));
        top_event_types.truncate(self.config.top_event_types);

        ActivityPatterns {
            distinct_event_types: distribution.len(),
            distribution,
            top_event_types,
        }
    }

    fn language_patterns(&self, window: &AnalysisWindow) -> LanguagePatterns {
        let mut distribution: Vec<LanguageCount> = Vec::new();

        for record in window.records() {
            // Records without an identifiable language are excluded, not
            // counted as "unknown".
            let Some(language) = record.language.as_deref() else {
                continue;
            };
            match distribution.iter_mut().find(|e| e.language == language) {
                Some(entry) => entry.count += 1,
                None => distribution.push(LanguageCount {
                    language: language.to_string(),
                    count: 1,
                }),
            }
        }

        let mut primary_language = None;
        let mut best = 0u64;
        for entry in &distribution {
            if entry.count > best {
                best = entry.count;
                primary_language = Some(entry.language.clone());
            }
        }

        LanguagePatterns {
            distinct_languages: distribution.len(),
            distribution,
            primary_language,
        }
    }

    fn repository_patterns(&self, repositories: &[RepositorySummary]) -> RepositoryPatterns {
        let total_stars: u64 = repositories.iter().map(|r| r.stars).sum();
        let total_forks: u64 = repositories.iter().map(|r| r.forks).sum();

        let mut most_starred: Option<RepositoryHighlight> = None;
        for repo in repositories {
            let beats = most_starred.as_ref().map(|m| repo.stars > m.stars);
            if beats.unwrap_or(true) {
                most_starred = Some(RepositoryHighlight {
                    name: repo.name.clone(),
                    stars: repo.stars,
                });
            }
        }

        RepositoryPatterns {
            total_repositories: repositories.len(),
            total_stars,
            total_forks,
            average_stars: safe_ratio(total_stars, repositories.len() as u64),
            most_starred,
        }
    }

    fn collaboration_patterns(&self, window: &AnalysisWindow) -> CollaborationPatterns {
        let mut patterns = CollaborationPatterns::default();

        for record in window.records() {
            let opened = record.action.as_deref() == Some("opened");
            match record.kind {
                EventKind::PullRequest if opened => patterns.pull_requests_opened += 1,
                // Without a recognizable sub-type the record counts as
                // participation, not authorship.
                EventKind::PullRequest | EventKind::PullRequestReview => {
                    patterns.pull_requests_participated += 1
                }
                EventKind::Issue if opened => patterns.issues_opened += 1,
                EventKind::Issue | EventKind::IssueComment => patterns.issues_participated += 1,
                _ => {}
            }
        }

        patterns
    }

    fn productivity_metrics(&self, window: &AnalysisWindow) -> ProductivityMetrics {
        let total_events = window.len() as u64;

        let active_days = window
            .records()
            .iter()
            .map(|r| r.occurred_at.date_naive())
            .collect::<BTreeSet<_>>()
            .len() as u64;

        let total_commits = window
            .records()
            .iter()
            .filter(|r| r.kind == EventKind::Push)
            .count() as u64;

        ProductivityMetrics {
            total_events,
            active_days,
            daily_average_events: safe_ratio(total_events, u64::from(window.lookback_days())),
            total_commits,
            commits_per_day: safe_ratio(total_commits, active_days),
        }
    }
}
