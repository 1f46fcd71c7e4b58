//! Configuration structures
//!
//! Resolved once at process start by the infra loader and passed to every
//! component that needs it.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RECENT_POST_COUNT;
use crate::errors::{LaunchBotError, Result};

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub oauth: OAuthAppConfig,
    #[serde(default)]
    pub environment: Environment,
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub announcements: AnnouncementConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Callback address registered with the provider for this environment.
    pub fn callback_url(&self) -> &str {
        match self.environment {
            Environment::Deployed => &self.oauth.callback_url,
            Environment::Emulator => {
                self.oauth.local_callback_url.as_deref().unwrap_or(&self.oauth.callback_url)
            }
        }
    }

    /// Check required fields.
    ///
    /// # Errors
    /// Returns `LaunchBotError::Config` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.oauth.client_id.trim().is_empty() {
            return Err(LaunchBotError::Config("oauth.client_id must not be empty".into()));
        }
        if self.callback_url().trim().is_empty() {
            return Err(LaunchBotError::Config("oauth.callback_url must not be empty".into()));
        }
        if self.storage.credential_path.trim().is_empty() {
            return Err(LaunchBotError::Config(
                "storage.credential_path must not be empty".into(),
            ));
        }
        if self.announcements.recent_post_count == 0 {
            return Err(LaunchBotError::Config(
                "announcements.recent_post_count must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// OAuth application registration.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthAppConfig {
    pub client_id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    pub callback_url: String,
    #[serde(default)]
    pub local_callback_url: Option<String>,
}

impl std::fmt::Debug for OAuthAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthAppConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("callback_url", &self.callback_url)
            .field("local_callback_url", &self.local_callback_url)
            .finish()
    }
}

/// Deployment target, selects the callback address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Deployed,
    Emulator,
}

/// Persistence locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub database_path: String,
    pub credential_path: String,
}

/// HTTP surface binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: "127.0.0.1:8080".into() }
    }
}

/// Message template revision for the daily digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestRevision {
    /// First revision, no footer.
    Original,
    /// Current revision, hashtag footer appended.
    #[default]
    Tagged,
}

/// Announcement rendering and throttle settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnouncementConfig {
    /// IANA timezone used for "today" and rendered times.
    pub timezone: String,
    pub digest_revision: DigestRevision,
    pub recent_post_count: u32,
}

impl Default for AnnouncementConfig {
    fn default() -> Self {
        Self {
            timezone: "Etc/GMT".into(),
            digest_revision: DigestRevision::default(),
            recent_post_count: DEFAULT_RECENT_POST_COUNT,
        }
    }
}

/// In-process cron triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub enabled: bool,
    pub daily_cron: String,
    pub alert_cron: String,
    pub job_timeout_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            daily_cron: "0 0 8 * * *".into(),
            alert_cron: "0 */5 * * * *".into(),
            job_timeout_secs: 60,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".into(), json: false }
    }
}
