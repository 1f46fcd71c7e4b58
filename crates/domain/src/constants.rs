//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Event window
pub const UPCOMING_EVENT_LIMIT: usize = 4;

// Imminent alert thresholds
pub const ALERT_MAX_HOURS: i64 = 3;
pub const ALERT_MAX_MINUTES: i64 = 36;
pub const ALERT_NOW_MINUTES: i64 = 10;
pub const ALERT_HOURLY_SLACK_MINUTES: i64 = 10;
pub const ALERT_MIN_MINUTES_SINCE_LAST_POST: i64 = 59;

/// Number of recent original posts fetched for the alert throttle.
pub const DEFAULT_RECENT_POST_COUNT: u32 = 5;

/// Mandatory hashtag closing every imminent alert.
pub const SERIES_HASHTAG: &str = "#F1";

// Message text
pub const DIGEST_HEADER: &str = "🚨 Daily F1 Car Launch Reminder 🚨";
pub const DIGEST_FOOTER: &str = "#F1 #F1Launches #Formula1";
pub const STATE_MISMATCH_MESSAGE: &str = "Stored tokens didn't match!";
