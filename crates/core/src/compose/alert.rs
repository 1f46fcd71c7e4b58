//! Imminent launch alert: countdown rules and text.
//!
//! Thresholds, with minutes rounded and hours floored from minutes:
//! - more than 3 hours out: skip
//! - under 1 hour: announce at 36 minutes or less, "happening now" at 10 or less
//! - 1 to 3 hours: announce only within 10 minutes past an hour mark, and only
//!   if the account has been quiet for more than 59 minutes

use std::fmt;

use chrono::{DateTime, Utc};
use launchbot_domain::{
    EventRecord, RecentPost, SkipReason, ALERT_HOURLY_SLACK_MINUTES, ALERT_MAX_HOURS,
    ALERT_MAX_MINUTES, ALERT_MIN_MINUTES_SINCE_LAST_POST, ALERT_NOW_MINUTES, SERIES_HASHTAG,
};

/// Time remaining until an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    /// Absolute distance in whole minutes, rounded to nearest.
    pub minutes: i64,
    /// `minutes / 60`, floored.
    pub hours: i64,
}

impl Countdown {
    pub fn between(now: DateTime<Utc>, event: DateTime<Utc>) -> Self {
        Self::from_minutes(rounded_minutes(event - now))
    }

    pub fn from_minutes(minutes: i64) -> Self {
        let minutes = minutes.abs();
        Self { minutes, hours: minutes / 60 }
    }
}

/// First line of the alert body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Headline {
    HappeningNow,
    MinutesToGo(i64),
    HoursToGo(i64),
}

impl fmt::Display for Headline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HappeningNow => write!(f, "Launch is happening now!"),
            Self::MinutesToGo(m) => write!(f, "{m} Minutes To Go"),
            Self::HoursToGo(1) => write!(f, "1 Hour To Go"),
            Self::HoursToGo(h) => write!(f, "{h} Hours To Go"),
        }
    }
}

/// What the alert job should do for a countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertPlan {
    /// Post unconditionally.
    Announce(Headline),
    /// Post unless the account posted recently.
    AnnounceIfQuiet(Headline),
    Skip(SkipReason),
}

impl AlertPlan {
    pub fn for_countdown(countdown: Countdown) -> Self {
        let Countdown { minutes, hours } = countdown;

        if hours > ALERT_MAX_HOURS {
            return Self::Skip(SkipReason::TooFarOut { hours });
        }
        if hours < 1 {
            return if minutes > ALERT_MAX_MINUTES {
                Self::Skip(SkipReason::OutsideCountdown { minutes })
            } else if minutes > ALERT_NOW_MINUTES {
                Self::Announce(Headline::MinutesToGo(minutes))
            } else {
                Self::Announce(Headline::HappeningNow)
            };
        }
        if minutes % 60 >= ALERT_HOURLY_SLACK_MINUTES {
            return Self::Skip(SkipReason::BetweenHourMarks { minutes });
        }
        Self::AnnounceIfQuiet(Headline::HoursToGo(hours))
    }
}

/// `PostedRecently` if the newest dated post is within the quiet period.
pub fn recent_activity(now: DateTime<Utc>, posts: &[RecentPost]) -> Option<SkipReason> {
    let latest = posts.iter().filter_map(|p| p.created_at).max()?;
    let minutes_ago = rounded_minutes(now - latest);
    (minutes_ago <= ALERT_MIN_MINUTES_SINCE_LAST_POST)
        .then_some(SkipReason::PostedRecently { minutes_ago })
}

fn rounded_minutes(delta: chrono::Duration) -> i64 {
    let secs = delta.num_seconds();
    let rounded = (secs.abs() + 30) / 60;
    if secs < 0 { -rounded } else { rounded }
}

/// Renders the alert text for one event.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlertComposer;

impl AlertComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn compose(&self, event: &EventRecord, headline: Headline) -> String {
        let mut msg = format!("🚨 {} Car Launch 🚨\n\n{headline}", event.team);
        if let Some(link) = event.link() {
            msg.push_str("\n\n");
            msg.push_str(link);
        }

        msg.push_str("\n\n");
        if let Some(handle) = event
            .twitter_handle
            .as_deref()
            .map(|h| h.trim_start_matches('@'))
            .filter(|h| !h.is_empty())
        {
            msg.push_str(&format!("@{handle} "));
        }
        msg.push_str(&format!("{} {SERIES_HASHTAG}", event.team_hashtag()));
        msg
    }
}
