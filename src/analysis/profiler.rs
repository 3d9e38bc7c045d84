use chrono::Duration;

use crate::analysis::safe_ratio;
use crate::config::AnalysisConfig;
use crate::models::{
    AnalysisWindow, CollaborationStyle, EventKind, ExpertiseLevel, PatternStatistics,
    ProductivityTrend, ProfileLabels,
};

/// Maps pattern statistics onto coarse categorical labels with fixed
/// threshold rules. No trained model; every cutoff comes from the
/// immutable `AnalysisConfig` and is validated before the pipeline runs.
///
/// Prediction and trend also need per-record timestamps, which the
/// statistics deliberately do not carry, so the window rides along.
pub struct Profiler {
    config: AnalysisConfig,
}

impl Profiler {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn label(&self, window: &AnalysisWindow, stats: &PatternStatistics) -> ProfileLabels {
        if window.is_empty() {
            return ProfileLabels::default();
        }

        ProfileLabels {
            expertise: self.expertise_level(stats),
            specializations: self.specializations(stats),
            collaboration_style: self.collaboration_style(stats),
            predicted_next_event: self
                .predict_next_event(window)
                .map(|kind| kind.label().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            productivity_trend: self.productivity_trend(window),
        }
    }

    /// Ordered rule table, highest level first; a row matches when both
    /// the commit and active-day cutoffs are met, which keeps the level
    /// monotone in both inputs.
    fn expertise_level(&self, stats: &PatternStatistics) -> ExpertiseLevel {
        let commits = stats.productivity.total_commits;
        let days = stats.productivity.active_days;
        let commit_cutoffs = &self.config.expertise_commit_cutoffs;
        let day_cutoffs = &self.config.expertise_day_cutoffs;

        let rows = [
            (ExpertiseLevel::Expert, commit_cutoffs[2], day_cutoffs[2]),
            (ExpertiseLevel::Advanced, commit_cutoffs[1], day_cutoffs[1]),
            (ExpertiseLevel::Intermediate, commit_cutoffs[0], day_cutoffs[0]),
        ];

        rows.iter()
            .find(|(_, min_commits, min_days)| commits >= *min_commits && days >= *min_days)
            .map(|(level, _, _)| *level)
            .unwrap_or(ExpertiseLevel::Novice)
    }

    /// Languages whose share of language-attributed events reaches the
    /// confidence threshold; the boundary is inclusive. Ordered by share
    /// descending, ties keeping first-seen order.
    fn specializations(&self, stats: &PatternStatistics) -> Vec<String> {
        let total: u64 = stats.language.distribution.iter().map(|e| e.count).sum();
        if total == 0 {
            return Vec::new();
        }

        let mut qualified: Vec<_> = stats
            .language
            .distribution
            .iter()
            .filter(|e| safe_ratio(e.count, total) >= self.config.specialization_confidence)
            .collect();
        qualified.sort_by(|a, b| b.count.cmp(&a.count));
        qualified.into_iter().map(|e| e.language.clone()).collect()
    }

    fn collaboration_style(&self, stats: &PatternStatistics) -> CollaborationStyle {
        let ratio = safe_ratio(stats.collaboration.total(), stats.productivity.total_events);
        if ratio < self.config.collaboration_occasional {
            CollaborationStyle::Solo
        } else if ratio < self.config.collaboration_frequent {
            CollaborationStyle::OccasionalCollaborator
        } else {
            CollaborationStyle::FrequentCollaborator
        }
    }

    /// Event kind with the highest recency-weighted count. Records in the
    /// most recent third of the window's time span carry extra weight;
    /// ties break on overall frequency, then first-seen order.
    fn predict_next_event(&self, window: &AnalysisWindow) -> Option<EventKind> {
        let (start, end) = window.span()?;
        let span = end - start;
        let recent_cutoff = end - span / 3;

        struct WeightedKind {
            kind: EventKind,
            weighted: f64,
            raw: u64,
        }

        let mut counts: Vec<WeightedKind> = Vec::new();
        for record in window.records() {
            let weight = if record.occurred_at >= recent_cutoff {
                self.config.recency_weight
            } else {
                1.0
            };
            match counts.iter_mut().find(|c| c.kind == record.kind) {
                Some(entry) => {
                    entry.weighted += weight;
                    entry.raw += 1;
                }
                None => counts.push(WeightedKind {
                    kind: record.kind,
                    weighted: weight,
                    raw: 1,
                }),
            }
        }

        let mut best: Option<&WeightedKind> = None;
        for candidate in &counts {
            let wins = match best {
                None => true,
                Some(current) => {
                    candidate.weighted > current.weighted
                        || (candidate.weighted == current.weighted && candidate.raw > current.raw)
                }
            };
            if wins {
                best = Some(candidate);
            }
        }
        best.map(|c| c.kind)
    }

    /// Compares the event rate of the window's first half against its
    /// second half. The halves span equal time, so raw counts compare
    /// directly under the configured relative margin.
    fn productivity_trend(&self, window: &AnalysisWindow) -> ProductivityTrend {
        let Some((start, end)) = window.span() else {
            return ProductivityTrend::Stable;
        };
        let span = end - start;
        if span <= Duration::zero() {
            return ProductivityTrend::Stable;
        }

        let midpoint = start + span / 2;
        let first_half = window
            .records()
            .iter()
            .filter(|r| r.occurred_at < midpoint)
            .count() as f64;
        let second_half = window.len() as f64 - first_half;

        if second_half > first_half * (1.0 + self.config.trend_margin) {
            ProductivityTrend::Increasing
        } else if second_half < first_half * (1.0 - self.config.trend_margin) {
            ProductivityTrend::Decreasing
        } else {
            ProductivityTrend::Stable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Normalizer, PatternAnalyzer};
    use crate::models::ActivityRecord;
    use chrono::{DateTime, TimeZone, Utc};

    fn record(kind: EventKind, occurred_at: DateTime<Utc>) -> ActivityRecord {
        ActivityRecord {
            kind,
            action: None,
            occurred_at,
            repository: Some("a/x".to_string()),
            language: None,
            is_private: false,
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    /// Unique timestamp on `day`, offset by `minute` past midnight.
    fn push_at(day: u32, minute: u32) -> ActivityRecord {
        record(
            EventKind::Push,
            at(day, 0) + chrono::Duration::minutes(i64::from(minute)),
        )
    }

    fn label_window(records: Vec<ActivityRecord>) -> ProfileLabels {
        let config = AnalysisConfig::default();
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let window = Normalizer::new(config.clone()).build_window(records, now);
        let stats = PatternAnalyzer::new(config.clone()).analyze(&window, &[]);
        Profiler::new(config).label(&window, &stats)
    }

    #[test]
    fn test_empty_window_yields_neutral_defaults() {
        let labels = label_window(vec![]);

        assert_eq!(labels.expertise, ExpertiseLevel::Novice);
        assert!(labels.specializations.is_empty());
        assert_eq!(labels.collaboration_style, CollaborationStyle::Solo);
        assert_eq!(labels.predicted_next_event, "unknown");
        assert_eq!(labels.productivity_trend, ProductivityTrend::Stable);
    }

    #[test]
    fn test_expertise_requires_both_commits_and_days() {
        // 60 commits over 2 days: commit count clears the advanced
        // cutoff but the day count holds it at novice.
        let records: Vec<_> = (0..60u32)
            .map(|i| push_at(1 + (i % 2), i / 2))
            .collect();
        assert_eq!(label_window(records).expertise, ExpertiseLevel::Novice);

        // 60 commits across 12 days clears advanced.
        let records: Vec<_> = (0..60u32)
            .map(|i| push_at(1 + (i % 12), i / 12))
            .collect();
        assert_eq!(label_window(records).expertise, ExpertiseLevel::Advanced);
    }

    #[test]
    fn test_expertise_is_monotonic_in_commits() {
        let smaller: Vec<_> = (0..12u32).map(|i| push_at(1 + (i % 4), i / 4)).collect();
        let mut larger = smaller.clone();
        larger.extend((0..48u32).map(|i| push_at(5 + (i % 8), i / 8)));

        let a = label_window(smaller).expertise;
        let b = label_window(larger).expertise;
        assert!(b >= a);
    }

    #[test]
    fn test_specialization_boundary_is_inclusive() {
        // Python 8/10 and JavaScript exactly 2/10 at the 0.20 threshold:
        // both qualify.
        let mut records = Vec::new();
        for i in 0..8u32 {
            let mut r = record(EventKind::Push, at(1, i));
            r.language = Some("Python".to_string());
            records.push(r);
        }
        for i in 0..2u32 {
            let mut r = record(EventKind::Push, at(2, i));
            r.language = Some("JavaScript".to_string());
            records.push(r);
        }

        let labels = label_window(records);
        assert_eq!(labels.specializations, vec!["Python", "JavaScript"]);
    }

    #[test]
    fn test_collaboration_style_thresholds() {
        // 20 events, none collaborative: solo.
        let solo: Vec<_> = (0..20u32).map(|i| push_at(1, i)).collect();
        assert_eq!(
            label_window(solo).collaboration_style,
            CollaborationStyle::Solo
        );

        // 4 of 20 collaborative (0.2): occasional.
        let mut occasional: Vec<_> = (0..16u32).map(|i| push_at(1, i)).collect();
        occasional.extend((0..4u32).map(|i| record(EventKind::IssueComment, at(3, i))));
        assert_eq!(
            label_window(occasional).collaboration_style,
            CollaborationStyle::OccasionalCollaborator
        );

        // 10 of 20 collaborative (0.5): frequent.
        let mut frequent: Vec<_> = (0..10u32).map(|i| push_at(1, i)).collect();
        frequent.extend((0..10u32).map(|i| record(EventKind::PullRequestReview, at(2, i))));
        assert_eq!(
            label_window(frequent).collaboration_style,
            CollaborationStyle::FrequentCollaborator
        );
    }

    #[test]
    fn test_prediction_favors_recent_activity() {
        // Stars dominate overall (6 vs 4 pushes), but every push falls in
        // the most recent third of the span, so the doubled weight puts
        // push ahead: 4 * 2.0 = 8.0 > 6.0.
        let mut records: Vec<_> = (0..6u32)
            .map(|i| record(EventKind::Star, at(1 + i / 3, i % 3)))
            .collect();
        records.extend((0..4u32).map(|i| record(EventKind::Push, at(30, i))));

        let labels = label_window(records);
        assert_eq!(labels.predicted_next_event, "push");
    }

    #[test]
    fn test_prediction_tie_breaks_on_overall_frequency() {
        // Fork: one old record plus two recent (weight 1 + 2 + 2 = 5,
        // raw 3). Issue: three old plus one recent (3 + 2 = 5, raw 4).
        // Weighted counts tie; issue wins on overall frequency even
        // though fork was seen first.
        let records = vec![
            record(EventKind::Fork, at(2, 0)),
            record(EventKind::Issue, at(3, 0)),
            record(EventKind::Issue, at(4, 0)),
            record(EventKind::Issue, at(5, 0)),
            record(EventKind::Fork, at(28, 0)),
            record(EventKind::Fork, at(28, 1)),
            record(EventKind::Issue, at(28, 2)),
        ];

        let labels = label_window(records);
        assert_eq!(labels.predicted_next_event, "issue");
    }

    #[test]
    fn test_trend_increasing_and_decreasing() {
        // 2 events in the first half of the span, 10 in the second.
        let mut increasing = vec![
            record(EventKind::Push, at(1, 0)),
            record(EventKind::Push, at(2, 0)),
        ];
        increasing.extend((0..10u32).map(|i| push_at(28, i)));
        assert_eq!(
            label_window(increasing).productivity_trend,
            ProductivityTrend::Increasing
        );

        let mut decreasing: Vec<_> = (0..10u32).map(|i| push_at(1, i)).collect();
        decreasing.extend([
            record(EventKind::Push, at(28, 0)),
            record(EventKind::Push, at(29, 0)),
        ]);
        assert_eq!(
            label_window(decreasing).productivity_trend,
            ProductivityTrend::Decreasing
        );
    }

    #[test]
    fn test_trend_stable_within_margin() {
        let mut records: Vec<_> = (0..10u32).map(|i| push_at(1, i)).collect();
        records.extend((0..10u32).map(|i| push_at(28, i)));
        assert_eq!(
            label_window(records).productivity_trend,
            ProductivityTrend::Stable
        );
    }

    #[test]
    fn test_single_timestamp_trend_is_stable() {
        let records = vec![
            record(EventKind::Push, at(1, 0)),
            record(EventKind::Star, at(1, 0)),
        ];
        assert_eq!(
            label_window(records).productivity_trend,
            ProductivityTrend::Stable
        );
    }
}
