use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse category of one unit of account activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Push,
    PullRequest,
    PullRequestReview,
    Issue,
    IssueComment,
    Fork,
    Star,
    Create,
    Release,
    Other,
}

impl EventKind {
    /// Maps the API's event type strings onto the internal categories.
    /// Unrecognized types land in `Other` rather than being dropped.
    pub fn from_api_type(event_type: &str) -> Self {
        match event_type {
            "PushEvent" => EventKind::Push,
            "PullRequestEvent" => EventKind::PullRequest,
            "PullRequestReviewEvent" | "PullRequestReviewCommentEvent" => {
                EventKind::PullRequestReview
            }
            "IssuesEvent" => EventKind::Issue,
            "IssueCommentEvent" => EventKind::IssueComment,
            "ForkEvent" => EventKind::Fork,
            "WatchEvent" => EventKind::Star,
            "CreateEvent" => EventKind::Create,
            "ReleaseEvent" => EventKind::Release,
            _ => EventKind::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Push => "push",
            EventKind::PullRequest => "pull_request",
            EventKind::PullRequestReview => "pull_request_review",
            EventKind::Issue => "issue",
            EventKind::IssueComment => "issue_comment",
            EventKind::Fork => "fork",
            EventKind::Star => "star",
            EventKind::Create => "create",
            EventKind::Release => "release",
            EventKind::Other => "other",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One normalized unit of observed activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRecord {
    pub kind: EventKind,
    pub action: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub repository: Option<String>,
    pub language: Option<String>,
    pub is_private: bool,
}

/// An immutable, timestamp-ordered sequence of activity records bounded
/// by the configured lookback period and record cap.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisWindow {
    records: Vec<ActivityRecord>,
    lookback_days: u32,
}

impl AnalysisWindow {
    pub fn new(records: Vec<ActivityRecord>, lookback_days: u32) -> Self {
        Self {
            records,
            lookback_days,
        }
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    pub fn into_records(self) -> Vec<ActivityRecord> {
        self.records
    }

    /// Timestamps of the oldest and newest records, if any.
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => Some((first.occurred_at, last.occurred_at)),
            _ => None,
        }
    }
}
