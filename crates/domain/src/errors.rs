//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for LaunchBot
///
/// Every variant aborts the current invocation. Suppressed announcements are
/// not errors and never travel through this type.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum LaunchBotError {
    /// Callback `state` did not match the persisted session.
    #[error("OAuth state mismatch")]
    StateMismatch,

    /// Refresh attempted without a stored refresh token.
    #[error("No stored credentials; run the authorization flow first")]
    NoCredentials,

    /// Token exchange or refresh rejected by the provider.
    #[error("Provider authentication error: {0}")]
    ProviderAuth(String),

    /// Event store unreachable or query failed.
    #[error("Event query error: {0}")]
    Query(String),

    /// Provider rejected the post.
    #[error("Post failed: {0}")]
    PostFailed(String),

    /// Provider lookup (identity, recent posts) failed.
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LaunchBotError {
    /// Stable label suitable for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::StateMismatch => "state_mismatch",
            Self::NoCredentials => "no_credentials",
            Self::ProviderAuth(_) => "provider_auth",
            Self::Query(_) => "query",
            Self::PostFailed(_) => "post_failed",
            Self::Provider(_) => "provider",
            Self::Database(_) => "database",
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for LaunchBot operations
pub type Result<T> = std::result::Result<T, LaunchBotError>;
