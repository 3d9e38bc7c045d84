use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use crate::config::AnalysisConfig;
use crate::models::{ActivityRecord, AnalysisWindow, EventKind, RawEvent};

/// Validates and reshapes raw events into an `AnalysisWindow`.
///
/// Records missing a resolvable timestamp or an event-type string are
/// dropped, never fatally rejected; everything else survives, with
/// unrecognized type strings mapped to the `other` category. Empty input
/// yields an empty window, not an error.
pub struct Normalizer {
    config: AnalysisConfig,
}

impl Normalizer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Convert raw events and assemble the bounded window. `languages`
    /// maps repository name to primary language for record enrichment;
    /// `now` anchors the lookback cutoff.
    pub fn normalize(
        &self,
        raw: &[RawEvent],
        languages: &HashMap<String, String>,
        now: DateTime<Utc>,
    ) -> AnalysisWindow {
        let records = raw
            .iter()
            .filter_map(|event| to_record(event, languages))
            .collect();
        self.build_window(records, now)
    }

    /// Bound, order, and deduplicate already-converted records. Separated
    /// from conversion so the operation is idempotent: feeding a window's
    /// own records back through produces an identical window.
    pub fn build_window(
        &self,
        mut records: Vec<ActivityRecord>,
        now: DateTime<Utc>,
    ) -> AnalysisWindow {
        let cutoff = now - Duration::days(i64::from(self.config.lookback_days));
        records.retain(|r| r.occurred_at >= cutoff && r.occurred_at <= now);

        // Secondary keys make the order fully deterministic and put
        // duplicates adjacent for the dedup pass.
        records.sort_by(|a, b| {
            a.occurred_at
                .cmp(&b.occurred_at)
                .then_with(|| a.repository.cmp(&b.repository))
                .then_with(|| a.kind.cmp(&b.kind))
        });
        records.dedup_by(|a, b| {
            a.repository == b.repository && a.kind == b.kind && a.occurred_at == b.occurred_at
        });

        // When over the cap, keep the newest records; recency carries the
        // signal for prediction and trend.
        if records.len() > self.config.max_events {
            records = records.split_off(records.len() - self.config.max_events);
        }

        AnalysisWindow::new(records, self.config.lookback_days)
    }
}

fn to_record(event: &RawEvent, languages: &HashMap<String, String>) -> Option<ActivityRecord> {
    let event_type = event.event_type.as_deref()?;
    let occurred_at = event
        .created_at
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())?
        .with_timezone(&Utc);

    let repository = event.repo.as_ref().and_then(|r| r.name.clone());
    let language = repository
        .as_deref()
        .and_then(|name| languages.get(name).cloned());

    Some(ActivityRecord {
        kind: EventKind::from_api_type(event_type),
        action: event.payload.as_ref().and_then(|p| p.action.clone()),
        occurred_at,
        repository,
        language,
        is_private: !event.public.unwrap_or(true),
    })
}
