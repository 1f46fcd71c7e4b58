//! Dated launch events read from the event collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled team launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub team: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub twitter_handle: Option<String>,
}

impl EventRecord {
    pub fn new(team: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self { team: team.into(), date, link: None, twitter_handle: None }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_twitter_handle(mut self, handle: impl Into<String>) -> Self {
        self.twitter_handle = Some(handle.into());
        self
    }

    /// Link, ignoring empty strings.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref().filter(|l| !l.is_empty())
    }

    /// Team name with all whitespace removed, prefixed with `#`.
    pub fn team_hashtag(&self) -> String {
        let compact: String = self.team.chars().filter(|c| !c.is_whitespace()).collect();
        format!("#{compact}")
    }
}

/// Range query over the event collection.
///
/// Bounds are strict (`date > after`, `date < before`); results are ordered by
/// date ascending and truncated to `limit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl EventQuery {
    pub fn after(instant: DateTime<Utc>) -> Self {
        Self { after: Some(instant), ..Self::default() }
    }

    pub fn before(mut self, instant: DateTime<Utc>) -> Self {
        self.before = Some(instant);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether an event date satisfies both bounds.
    pub fn matches(&self, date: DateTime<Utc>) -> bool {
        self.after.map_or(true, |after| date > after)
            && self.before.map_or(true, |before| date < before)
    }
}
