use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};

use crate::analysis::insights::InsightGenerator;
use crate::analysis::normalizer::Normalizer;
use crate::analysis::patterns::PatternAnalyzer;
use crate::analysis::profiler::Profiler;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::github::ActivitySource;
use crate::models::{AccountSnapshot, ActivityReport};

/// Runs the full analysis for one account: fetch a snapshot through the
/// data source, then normalize, aggregate, label, and narrate. Each
/// stage is a pure function of its input; the pipeline holds no state
/// between invocations beyond the immutable configuration.
pub struct AnalysisPipeline {
    source: Arc<dyn ActivitySource>,
    normalizer: Normalizer,
    analyzer: PatternAnalyzer,
    profiler: Profiler,
    insights: InsightGenerator,
}

impl AnalysisPipeline {
    /// Fails fast on invalid configuration; the pipeline refuses to run
    /// rather than silently misclassify.
    pub fn new(source: impl ActivitySource + 'static, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source: Arc::new(source),
            normalizer: Normalizer::new(config.clone()),
            analyzer: PatternAnalyzer::new(config.clone()),
            profiler: Profiler::new(config.clone()),
            insights: InsightGenerator::new(config),
        })
    }

    pub async fn analyze_user(&self, username: &str) -> Result<ActivityReport> {
        tracing::info!("Fetching account snapshot for: {}", username);
        let spinner = fetch_spinner(username);
        let snapshot = self.source.fetch_snapshot(username).await?;
        spinner.finish_and_clear();

        tracing::info!(
            "Fetched {} events and {} repositories",
            snapshot.events.len(),
            snapshot.repositories.len()
        );

        Ok(self.analyze_snapshot(snapshot))
    }

    /// The pure portion of the run, separated so tests can feed fixture
    /// snapshots without a network source.
    pub fn analyze_snapshot(&self, snapshot: AccountSnapshot) -> ActivityReport {
        if let Some(contributions) = &snapshot.contributions {
            tracing::debug!(
                "Source contribution summary: {} events across {} active days in {} repositories",
                contributions.total_events,
                contributions.active_days.len(),
                contributions.repositories.len()
            );
        }

        let languages: HashMap<String, String> = snapshot
            .repositories
            .iter()
            .filter_map(|r| r.language.clone().map(|lang| (r.name.clone(), lang)))
            .collect();

        let window = self
            .normalizer
            .normalize(&snapshot.events, &languages, Utc::now());
        if window.is_empty() {
            tracing::warn!("No usable activity records for {}", snapshot.profile.login);
        }

        let patterns = self.analyzer.analyze(&window, &snapshot.repositories);
        let labels = self.profiler.label(&window, &patterns);
        let set = self.insights.generate(&patterns, &labels);

        tracing::info!(
            "Analyzed {} records: {} insights, {} recommendations",
            window.len(),
            set.insights.len(),
            set.recommendations.len()
        );

        ActivityReport {
            profile: snapshot.profile,
            patterns,
            labels,
            summary: set.summary,
            insights: set.insights,
            recommendations: set.recommendations,
            generated_at: Utc::now(),
        }
    }
}

fn fetch_spinner(username: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Fetching activity for {}", username));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::{Profile, RawEvent, RawPayload, RawRepoRef, RepositorySummary};
    use async_trait::async_trait;
    use chrono::Duration;

    struct FixtureSource {
        snapshot: AccountSnapshot,
    }

    #[async_trait]
    impl ActivitySource for FixtureSource {
        async fn fetch_snapshot(&self, _username: &str) -> Result<AccountSnapshot> {
            Ok(self.snapshot.clone())
        }
    }

    fn profile() -> Profile {
        Profile {
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            bio: None,
            public_repos: 2,
            followers: 10,
            following: 5,
        }
    }

    fn push_event(days_ago: i64, action: Option<&str>, kind: &str) -> RawEvent {
        let created = Utc::now() - Duration::days(days_ago);
        RawEvent {
            event_type: Some(kind.to_string()),
            created_at: Some(created.to_rfc3339()),
            repo: Some(RawRepoRef {
                name: Some("octocat/hello".to_string()),
            }),
            payload: action.map(|a| RawPayload {
                action: Some(a.to_string()),
            }),
            public: Some(true),
        }
    }

    fn snapshot(events: Vec<RawEvent>) -> AccountSnapshot {
        AccountSnapshot {
            profile: profile(),
            events,
            repositories: vec![RepositorySummary {
                name: "octocat/hello".to_string(),
                language: Some("Rust".to_string()),
                stars: 42,
                forks: 3,
                is_fork: false,
            }],
            contributions: None,
        }
    }

    #[tokio::test]
    async fn test_pipeline_produces_complete_report() {
        let events: Vec<_> = (1..=12)
            .map(|i| push_event(i, None, "PushEvent"))
            .chain((1..=3).map(|i| push_event(i, Some("opened"), "PullRequestEvent")))
            .collect();

        let pipeline =
            AnalysisPipeline::new(FixtureSource { snapshot: snapshot(events) }, AnalysisConfig::default())
                .unwrap();
        let report = pipeline.analyze_user("octocat").await.unwrap();

        assert_eq!(report.profile.login, "octocat");
        assert_eq!(report.patterns.productivity.total_events, 15);
        assert_eq!(report.patterns.productivity.total_commits, 12);
        assert_eq!(report.patterns.collaboration.pull_requests_opened, 3);
        assert_eq!(
            report.patterns.language.primary_language.as_deref(),
            Some("Rust")
        );
        assert!(!report.summary.is_empty());
        assert!(!report.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_handles_empty_event_stream() {
        let pipeline =
            AnalysisPipeline::new(FixtureSource { snapshot: snapshot(vec![]) }, AnalysisConfig::default())
                .unwrap();
        let report = pipeline.analyze_user("octocat").await.unwrap();

        assert_eq!(report.patterns.productivity.total_events, 0);
        assert_eq!(report.labels.predicted_next_event, "unknown");
        assert!(report.summary.contains("novice"));
    }

    #[test]
    fn test_invalid_configuration_refuses_to_construct() {
        let config = AnalysisConfig {
            expertise_commit_cutoffs: [150, 50, 10],
            ..Default::default()
        };
        let result = AnalysisPipeline::new(FixtureSource { snapshot: snapshot(vec![]) }, config);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
