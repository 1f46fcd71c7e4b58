//! Posting-provider data and announcement outcomes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of the authorized account ("who am I").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub name: String,
    pub username: String,
}

/// An original (non-reply, non-repost) post by the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentPost {
    pub id: String,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Provider response for a created post, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostReceipt {
    pub id: Option<String>,
    pub data: serde_json::Value,
}

impl PostReceipt {
    pub fn from_data(data: serde_json::Value) -> Self {
        let id = data.get("id").and_then(|v| v.as_str()).map(str::to_owned);
        Self { id, data }
    }
}

/// Why an invocation produced no post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// No event after now.
    NoUpcomingEvents,
    /// No event between now and the next midnight.
    NoEventToday,
    /// Imminent event more than three hours out.
    TooFarOut { hours: i64 },
    /// Under an hour out but beyond the minute countdown.
    OutsideCountdown { minutes: i64 },
    /// One to three hours out but not near an hour mark.
    BetweenHourMarks { minutes: i64 },
    /// The account posted too recently.
    PostedRecently { minutes_ago: i64 },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoUpcomingEvents => write!(f, "no upcoming events"),
            Self::NoEventToday => write!(f, "no event today"),
            Self::TooFarOut { hours } => write!(f, "next event is {hours} hours out"),
            Self::OutsideCountdown { minutes } => {
                write!(f, "next event is {minutes} minutes out, outside the countdown")
            }
            Self::BetweenHourMarks { minutes } => {
                write!(f, "next event is {minutes} minutes out, between hour marks")
            }
            Self::PostedRecently { minutes_ago } => {
                write!(f, "last post was {minutes_ago} minutes ago")
            }
        }
    }
}

/// Result of one announcement invocation. Suppression is a success.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnouncementOutcome {
    Posted(PostReceipt),
    Skipped(SkipReason),
}

impl AnnouncementOutcome {
    pub fn is_posted(&self) -> bool {
        matches!(self, Self::Posted(_))
    }
}
