//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! The binary calls `dotenvy` before [`load`], so a `.env` file feeds the
//! environment step.
//!
//! ## Environment Variables
//! Required:
//! - `LAUNCHBOT_CLIENT_ID`: OAuth client id
//! - `LAUNCHBOT_CALLBACK_URL`: Deployed callback URL
//! - `LAUNCHBOT_DB_PATH`: SQLite database file
//! - `LAUNCHBOT_CREDENTIAL_PATH`: Credential document path
//!
//! Optional:
//! - `LAUNCHBOT_CLIENT_SECRET`, `LAUNCHBOT_LOCAL_CALLBACK_URL`
//! - `LAUNCHBOT_ENVIRONMENT`: `deployed` (default) or `emulator`
//! - `LAUNCHBOT_BIND_ADDR`
//! - `LAUNCHBOT_TIMEZONE`, `LAUNCHBOT_DIGEST_REVISION`,
//!   `LAUNCHBOT_RECENT_POST_COUNT`
//! - `LAUNCHBOT_SCHEDULE_ENABLED`, `LAUNCHBOT_DAILY_CRON`,
//!   `LAUNCHBOT_ALERT_CRON`, `LAUNCHBOT_JOB_TIMEOUT_SECS`
//! - `LAUNCHBOT_LOG_LEVEL`, `LAUNCHBOT_LOG_JSON`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./launchbot.json` or `./launchbot.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono_tz::Tz;
use launchbot_domain::{
    AnnouncementConfig, Config, DigestRevision, Environment, LaunchBotError, LoggingConfig,
    OAuthAppConfig, Result, ScheduleConfig, ServerConfig, StorageConfig,
};

/// Load and validate configuration with automatic fallback strategy
///
/// Uses environment variables when every required one is set. Only missing
/// required variables fall back to a config file; an invalid value in the
/// environment is reported as is.
///
/// # Errors
/// Returns `LaunchBotError::Config` if:
/// - An environment variable holds an invalid value
/// - No config file is found while required variables are missing
/// - File format is invalid
/// - Required fields are missing or invalid
pub fn load() -> Result<Config> {
    let missing = missing_required_env();
    let config = if missing.is_empty() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        config
    } else {
        tracing::debug!(?missing, "Required environment variables missing, trying file");
        load_from_file(None)?
    };

    validate(&config)?;
    Ok(config)
}

const REQUIRED_ENV_VARS: [&str; 4] = [
    "LAUNCHBOT_CLIENT_ID",
    "LAUNCHBOT_CALLBACK_URL",
    "LAUNCHBOT_DB_PATH",
    "LAUNCHBOT_CREDENTIAL_PATH",
];

fn missing_required_env() -> Vec<&'static str> {
    REQUIRED_ENV_VARS.into_iter().filter(|key| std::env::var(key).is_err()).collect()
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Optional ones fall
/// back to the section defaults.
///
/// # Errors
/// Returns `LaunchBotError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let oauth = OAuthAppConfig {
        client_id: env_var("LAUNCHBOT_CLIENT_ID")?,
        client_secret: env_opt("LAUNCHBOT_CLIENT_SECRET"),
        callback_url: env_var("LAUNCHBOT_CALLBACK_URL")?,
        local_callback_url: env_opt("LAUNCHBOT_LOCAL_CALLBACK_URL"),
    };
    let storage = StorageConfig {
        database_path: env_var("LAUNCHBOT_DB_PATH")?,
        credential_path: env_var("LAUNCHBOT_CREDENTIAL_PATH")?,
    };

    let environment = match env_opt("LAUNCHBOT_ENVIRONMENT") {
        Some(value) => parse_environment(&value)?,
        None => Environment::default(),
    };

    let server = ServerConfig {
        bind_addr: env_opt("LAUNCHBOT_BIND_ADDR").unwrap_or(ServerConfig::default().bind_addr),
    };

    let defaults = AnnouncementConfig::default();
    let announcements = AnnouncementConfig {
        timezone: env_opt("LAUNCHBOT_TIMEZONE").unwrap_or(defaults.timezone),
        digest_revision: match env_opt("LAUNCHBOT_DIGEST_REVISION") {
            Some(value) => parse_revision(&value)?,
            None => defaults.digest_revision,
        },
        recent_post_count: env_parse("LAUNCHBOT_RECENT_POST_COUNT", defaults.recent_post_count)?,
    };

    let defaults = ScheduleConfig::default();
    let schedule = ScheduleConfig {
        enabled: env_bool("LAUNCHBOT_SCHEDULE_ENABLED", defaults.enabled),
        daily_cron: env_opt("LAUNCHBOT_DAILY_CRON").unwrap_or(defaults.daily_cron),
        alert_cron: env_opt("LAUNCHBOT_ALERT_CRON").unwrap_or(defaults.alert_cron),
        job_timeout_secs: env_parse("LAUNCHBOT_JOB_TIMEOUT_SECS", defaults.job_timeout_secs)?,
    };

    let defaults = LoggingConfig::default();
    let logging = LoggingConfig {
        level: env_opt("LAUNCHBOT_LOG_LEVEL").unwrap_or(defaults.level),
        json: env_bool("LAUNCHBOT_LOG_JSON", defaults.json),
    };

    Ok(Config { oauth, environment, storage, server, announcements, schedule, logging })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `LaunchBotError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(LaunchBotError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            LaunchBotError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| LaunchBotError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Structural checks plus IANA timezone resolution.
///
/// # Errors
/// Returns `LaunchBotError::Config` naming the offending field.
pub fn validate(config: &Config) -> Result<()> {
    config.validate()?;
    Tz::from_str(&config.announcements.timezone).map_err(|_| {
        LaunchBotError::Config(format!(
            "announcements.timezone '{}' is not a known IANA timezone",
            config.announcements.timezone
        ))
    })?;
    Ok(())
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| LaunchBotError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| LaunchBotError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(LaunchBotError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the working directory, its parent, and the executable's
/// directory.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("launchbot.json"),
            cwd.join("launchbot.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("launchbot.json"),
                exe_dir.join("launchbot.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn parse_environment(value: &str) -> Result<Environment> {
    match value.to_ascii_lowercase().as_str() {
        "deployed" | "production" => Ok(Environment::Deployed),
        "emulator" | "local" => Ok(Environment::Emulator),
        other => Err(LaunchBotError::Config(format!("Invalid environment: {other}"))),
    }
}

fn parse_revision(value: &str) -> Result<DigestRevision> {
    match value.to_ascii_lowercase().as_str() {
        "original" => Ok(DigestRevision::Original),
        "tagged" => Ok(DigestRevision::Tagged),
        other => Err(LaunchBotError::Config(format!("Invalid digest revision: {other}"))),
    }
}

/// Get required environment variable
///
/// # Errors
/// Returns `LaunchBotError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        LaunchBotError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional variable, treating empty values as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_opt(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| LaunchBotError::Config(format!("Invalid value for {key}: {e}"))),
        None => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
