//! Announcement jobs: daily digest and imminent alert.

pub mod service;

use chrono_tz::Tz;
use launchbot_domain::{AnnouncementConfig, DigestRevision, LaunchBotError, Result};

pub use service::AnnouncementService;

/// Resolved announcement settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnouncementSettings {
    pub timezone: Tz,
    pub digest_revision: DigestRevision,
    pub recent_post_count: u32,
}

impl AnnouncementSettings {
    /// Parse the configured timezone name.
    ///
    /// # Errors
    /// Returns `LaunchBotError::Config` for unknown IANA names.
    pub fn from_config(config: &AnnouncementConfig) -> Result<Self> {
        let timezone = config.timezone.parse::<Tz>().map_err(|e| {
            LaunchBotError::Config(format!("invalid timezone '{}': {e}", config.timezone))
        })?;
        Ok(Self {
            timezone,
            digest_revision: config.digest_revision,
            recent_post_count: config.recent_post_count,
        })
    }
}

impl Default for AnnouncementSettings {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Etc::GMT,
            digest_revision: DigestRevision::default(),
            recent_post_count: launchbot_domain::DEFAULT_RECENT_POST_COUNT,
        }
    }
}
