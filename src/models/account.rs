use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Immutable profile snapshot as returned by the users endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub language: Option<String>,
    #[serde(alias = "stargazers_count", default)]
    pub stars: u64,
    #[serde(alias = "forks_count", default)]
    pub forks: u64,
    #[serde(alias = "fork", default)]
    pub is_fork: bool,
}

/// One entry from the public events feed, exactly as the API shapes it.
/// Every field is optional; the normalizer decides what is usable.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub created_at: Option<String>,
    pub repo: Option<RawRepoRef>,
    pub payload: Option<RawPayload>,
    pub public: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRepoRef {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPayload {
    pub action: Option<String>,
}

/// Everything the data source hands to the pipeline for one account.
#[derive(Debug, Clone)]
pub struct AccountSnapshot {
    pub profile: Profile,
    pub events: Vec<RawEvent>,
    pub repositories: Vec<RepositorySummary>,
    pub contributions: Option<ContributionSummary>,
}

/// Coarse contribution stats derived from the raw event feed. Logged as a
/// fetch-stage sanity check; the classifiers recompute what they need from
/// the normalized window.
#[derive(Debug, Clone, Serialize)]
pub struct ContributionSummary {
    pub total_events: usize,
    pub active_days: Vec<NaiveDate>,
    pub repositories: Vec<String>,
}

impl ContributionSummary {
    pub fn from_events(events: &[RawEvent]) -> Self {
        let mut active_days = BTreeSet::new();
        let mut repositories = BTreeSet::new();

        for event in events {
            if let Some(created_at) = event.created_at.as_deref() {
                if let Ok(timestamp) = DateTime::parse_from_rfc3339(created_at) {
                    active_days.insert(timestamp.with_timezone(&Utc).date_naive());
                }
            }
            if let Some(name) = event.repo.as_ref().and_then(|r| r.name.clone()) {
                repositories.insert(name);
            }
        }

        Self {
            total_events: events.len(),
            active_days: active_days.into_iter().rev().collect(),
            repositories: repositories.into_iter().collect(),
        }
    }
}
