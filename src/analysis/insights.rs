use crate::analysis::safe_ratio;
use crate::config::AnalysisConfig;
use crate::models::{
    CollaborationStyle, EventKind, ExpertiseLevel, InsightSet, PatternStatistics,
    ProductivityTrend, ProfileLabels,
};

/// Active-day count below which the consistency recommendation fires.
const LOW_ACTIVE_DAYS: u64 = 30;
/// Distinct-language count below which the breadth recommendation fires.
const LOW_LANGUAGE_DIVERSITY: usize = 3;
/// Star total above which the popularity insight fires.
const POPULAR_STARS: u64 = 100;

/// Languages flagged as modern adoption signals.
const MODERN_LANGUAGES: [&str; 4] = ["Rust", "Go", "TypeScript", "Kotlin"];

type RuleCondition = fn(&PatternStatistics, &ProfileLabels) -> bool;

struct RecommendationRule {
    condition: RuleCondition,
    text: &'static str,
}

/// Fixed priority order; every firing rule is included, each at most
/// once per run.
const RECOMMENDATION_RULES: &[RecommendationRule] = &[
    RecommendationRule {
        condition: low_collaboration,
        text: "Participate more in pull request reviews and issue discussions to grow collaboration skills",
    },
    RecommendationRule {
        condition: low_consistency,
        text: "Consider maintaining more consistent activity for better project momentum",
    },
    RecommendationRule {
        condition: declining_trend,
        text: "Recent activity is trending down; schedule regular contribution time to recover momentum",
    },
    RecommendationRule {
        condition: low_language_diversity,
        text: "Explore additional programming languages to broaden your skill set",
    },
    RecommendationRule {
        condition: always,
        text: "Continue documenting your projects to increase visibility and adoption",
    },
];

fn low_collaboration(_stats: &PatternStatistics, labels: &ProfileLabels) -> bool {
    labels.collaboration_style == CollaborationStyle::Solo
}

fn low_consistency(stats: &PatternStatistics, _labels: &ProfileLabels) -> bool {
    stats.productivity.active_days < LOW_ACTIVE_DAYS
}

fn declining_trend(_stats: &PatternStatistics, labels: &ProfileLabels) -> bool {
    labels.productivity_trend == ProductivityTrend::Decreasing
}

fn low_language_diversity(stats: &PatternStatistics, _labels: &ProfileLabels) -> bool {
    stats.language.distinct_languages < LOW_LANGUAGE_DIVERSITY
}

fn always(_stats: &PatternStatistics, _labels: &ProfileLabels) -> bool {
    true
}

/// Converts statistics and labels into ranked human-readable text.
/// Deterministic for identical inputs, and never states anything the
/// statistics do not support: each category is gated by a minimum-data
/// guard so sparse windows stay quiet.
pub struct InsightGenerator {
    config: AnalysisConfig,
}

impl InsightGenerator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self, stats: &PatternStatistics, labels: &ProfileLabels) -> InsightSet {
        let mut insights = Vec::new();

        if stats.productivity.total_events >= self.config.min_insight_events {
            insights.extend(self.time_insights(stats));
            insights.extend(self.activity_insights(stats));
            insights.extend(self.language_insights(stats));
            insights.extend(self.productivity_insights(stats));
        }

        InsightSet {
            summary: self.summary(stats, labels),
            insights,
            recommendations: RECOMMENDATION_RULES
                .iter()
                .filter(|rule| (rule.condition)(stats, labels))
                .map(|rule| rule.text.to_string())
                .collect(),
        }
    }

    fn summary(&self, stats: &PatternStatistics, labels: &ProfileLabels) -> String {
        let article = match labels.expertise {
            ExpertiseLevel::Novice => "A",
            _ => "An",
        };

        let mut summary = match labels.specializations.first() {
            Some(language) => format!(
                "{} {} developer specializing in {}",
                article, labels.expertise, language
            ),
            None => format!(
                "{} {} developer with no dominant language yet",
                article, labels.expertise
            ),
        };

        if let Some(day) = stats.time.most_active_day.as_deref() {
            summary.push_str(&format!(", most active on {}s", day));
        }
        summary.push('.');
        summary
    }

    fn time_insights(&self, stats: &PatternStatistics) -> Vec<String> {
        let mut insights = Vec::new();

        if let Some(peak) = stats.time.peak_hours.first() {
            insights.push(format!(
                "Most active during {} hours (around {}:00)",
                time_period(peak.hour),
                peak.hour
            ));
        }
        if let Some(day) = stats.time.most_active_day.as_deref() {
            insights.push(format!("Most productive on {}s", day));
        }

        insights
    }

    fn activity_insights(&self, stats: &PatternStatistics) -> Vec<String> {
        let mut insights = Vec::new();
        let total = stats.productivity.total_events;

        let pushes = count_of(stats, EventKind::Push);
        if pushes > 0 {
            insights.push(format!(
                "Pushes code frequently ({:.1}% of activity)",
                safe_ratio(pushes, total) * 100.0
            ));
        }
        if count_of(stats, EventKind::PullRequest) > 0
            || count_of(stats, EventKind::PullRequestReview) > 0
        {
            insights.push("Actively participates in code review via pull requests".to_string());
        }
        if count_of(stats, EventKind::Issue) > 0 || count_of(stats, EventKind::IssueComment) > 0 {
            insights.push("Engages in issue tracking and project discussion".to_string());
        }
        if stats.activity.distinct_event_types > 5 {
            insights.push(
                "Shows diverse contribution patterns across multiple activity types".to_string(),
            );
        }

        insights
    }

    fn language_insights(&self, stats: &PatternStatistics) -> Vec<String> {
        let mut insights = Vec::new();

        if let Some(primary) = stats.language.primary_language.as_deref() {
            insights.push(format!("Primary expertise in {}", primary));
        }

        let diversity = stats.language.distinct_languages;
        if diversity > 5 {
            insights.push(format!(
                "Polyglot developer with experience in {} languages",
                diversity
            ));
        } else if diversity > 3 {
            insights.push(format!("Works with multiple languages ({} total)", diversity));
        }

        // First-seen order of the distribution keeps this deterministic.
        let modern: Vec<&str> = stats
            .language
            .distribution
            .iter()
            .map(|e| e.language.as_str())
            .filter(|l| MODERN_LANGUAGES.contains(l))
            .collect();
        if !modern.is_empty() {
            insights.push(format!("Adopts modern languages: {}", modern.join(", ")));
        }

        insights
    }

    fn productivity_insights(&self, stats: &PatternStatistics) -> Vec<String> {
        let mut insights = Vec::new();
        let productivity = &stats.productivity;

        if productivity.daily_average_events > 10.0 {
            insights.push("Extremely active developer with high daily engagement".to_string());
        } else if productivity.daily_average_events > 5.0 {
            insights.push("Maintains consistent daily activity".to_string());
        } else if productivity.daily_average_events > 2.0 {
            insights.push("Regular contributor with steady activity".to_string());
        }

        if productivity.commits_per_day > 5.0 {
            insights.push(format!(
                "High commit frequency ({:.1} commits/day)",
                productivity.commits_per_day
            ));
        }

        if stats.repository.total_stars > POPULAR_STARS {
            insights.push(format!(
                "Creates popular projects ({} total stars)",
                stats.repository.total_stars
            ));
        }

        insights
    }
}

fn count_of(stats: &PatternStatistics, kind: EventKind) -> u64 {
    stats
        .activity
        .distribution
        .iter()
        .find(|e| e.kind == kind)
        .map(|e| e.count)
        .unwrap_or(0)
}

fn time_period(hour: u8) -> &'static str {
    match hour {
        5..=11 => "morning",
        12..=16 => "afternoon",
        17..=20 => "evening",
        _ => "night",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ActivityPatterns, EventTypeCount, HourCount, LanguageCount, LanguagePatterns,
        ProductivityMetrics, TimePatterns,
    };

    fn generator() -> InsightGenerator {
        InsightGenerator::new(AnalysisConfig::default())
    }

    fn stats_with_events(total: u64) -> PatternStatistics {
        PatternStatistics {
            time: TimePatterns {
                peak_hours: vec![HourCount {
                    hour: 14,
                    count: total,
                }],
                most_active_day: Some("Monday".to_string()),
                ..Default::default()
            },
            activity: ActivityPatterns {
                distribution: vec![EventTypeCount {
                    kind: EventKind::Push,
                    count: total,
                }],
                top_event_types: vec![EventTypeCount {
                    kind: EventKind::Push,
                    count: total,
                }],
                distinct_event_types: 1,
            },
            productivity: ProductivityMetrics {
                total_events: total,
                active_days: 1,
                daily_average_events: total as f64 / 90.0,
                total_commits: total,
                commits_per_day: total as f64,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_input_summary_references_novice() {
        let set = generator().generate(&PatternStatistics::default(), &ProfileLabels::default());

        assert!(set.summary.contains("novice"));
        assert!(set.insights.is_empty());
        assert!(!set.recommendations.is_empty());
    }

    #[test]
    fn test_sparse_data_emits_no_category_insights() {
        let stats = stats_with_events(4);
        let set = generator().generate(&stats, &ProfileLabels::default());
        assert!(set.insights.is_empty());
    }

    #[test]
    fn test_category_insights_ordered_by_category() {
        let mut stats = stats_with_events(20);
        stats.language = LanguagePatterns {
            distribution: vec![LanguageCount {
                language: "Rust".to_string(),
                count: 20,
            }],
            primary_language: Some("Rust".to_string()),
            distinct_languages: 1,
        };
        let set = generator().generate(&stats, &ProfileLabels::default());

        let afternoon = set
            .insights
            .iter()
            .position(|i| i.contains("afternoon"))
            .unwrap();
        let pushes = set
            .insights
            .iter()
            .position(|i| i.contains("Pushes code"))
            .unwrap();
        let rust = set
            .insights
            .iter()
            .position(|i| i.contains("Primary expertise in Rust"))
            .unwrap();
        assert!(afternoon < pushes);
        assert!(pushes < rust);
        assert!(set
            .insights
            .iter()
            .any(|i| i.contains("Adopts modern languages: Rust")));
    }

    #[test]
    fn test_summary_is_deterministic_and_complete() {
        let stats = stats_with_events(20);
        let labels = ProfileLabels {
            expertise: ExpertiseLevel::Intermediate,
            specializations: vec!["Python".to_string()],
            ..Default::default()
        };

        let first = generator().generate(&stats, &labels);
        let second = generator().generate(&stats, &labels);
        assert_eq!(first, second);
        assert_eq!(
            first.summary,
            "An intermediate developer specializing in Python, most active on Mondays."
        );
    }

    #[test]
    fn test_recommendations_follow_rule_priority() {
        let stats = stats_with_events(20);
        let labels = ProfileLabels {
            productivity_trend: ProductivityTrend::Decreasing,
            ..Default::default()
        };
        let set = generator().generate(&stats, &labels);

        // Solo + few active days + declining + single language + the
        // unconditional documentation rule: all fire, in table order.
        assert_eq!(set.recommendations.len(), 5);
        assert!(set.recommendations[0].contains("pull request reviews"));
        assert!(set.recommendations[1].contains("consistent activity"));
        assert!(set.recommendations[2].contains("trending down"));
        assert!(set.recommendations[3].contains("programming languages"));
        assert!(set.recommendations[4].contains("documenting"));
    }

    #[test]
    fn test_satisfied_conditions_suppress_rules() {
        let mut stats = stats_with_events(40);
        stats.productivity.active_days = 45;
        stats.language.distinct_languages = 4;
        let labels = ProfileLabels {
            collaboration_style: CollaborationStyle::FrequentCollaborator,
            ..Default::default()
        };
        let set = generator().generate(&stats, &labels);

        assert_eq!(set.recommendations.len(), 1);
        assert!(set.recommendations[0].contains("documenting"));
    }

    #[test]
    fn test_time_period_buckets() {
        assert_eq!(time_period(6), "morning");
        assert_eq!(time_period(14), "afternoon");
        assert_eq!(time_period(19), "evening");
        assert_eq!(time_period(2), "night");
        assert_eq!(time_period(23), "night");
    }
}
