//! OAuth 2.0 types and structures
//!
//! Token sets, token endpoint wire formats and provider configuration.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const TWITTER_AUTHORIZE_URL: &str = "https://twitter.com/i/oauth2/authorize";
const TWITTER_TOKEN_URL: &str = "https://api.twitter.com/2/oauth2/token";
const TWITTER_SCOPES: [&str; 4] = ["tweet.write", "tweet.read", "users.read", "offline.access"];

/// Access/refresh token pair returned by the token endpoint.
///
/// `refresh_token` is optional because a provider may omit it when
/// `offline.access` was not granted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub token_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl TokenSet {
    /// Build a token set, deriving `expires_at` from `expires_in` seconds.
    #[must_use]
    pub fn new(
        access_token: String,
        refresh_token: Option<String>,
        expires_in: Option<i64>,
        scope: Option<String>,
    ) -> Self {
        let expires_at = expires_in
            .filter(|secs| *secs > 0)
            .map(|secs| Utc::now() + chrono::Duration::seconds(secs));

        Self { access_token, refresh_token, token_type: "bearer".to_string(), expires_at, scope }
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Token endpoint success body (RFC 6749 §5.1).
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
}

impl From<TokenResponse> for TokenSet {
    fn from(response: TokenResponse) -> Self {
        let mut tokens = Self::new(
            response.access_token,
            response.refresh_token,
            response.expires_in,
            response.scope,
        );
        if let Some(token_type) = response.token_type {
            tokens.token_type = token_type;
        }
        tokens
    }
}

/// Token endpoint error body (RFC 6749 §5.2).
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

impl fmt::Display for OAuthErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_description {
            Some(desc) => write!(f, "{}: {}", self.error, desc),
            None => write!(f, "{}", self.error),
        }
    }
}

/// Provider endpoints and client registration.
#[derive(Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub scopes: Vec<String>,
}

impl OAuthConfig {
    /// Configuration for the Twitter/X OAuth 2.0 endpoints with the bot's
    /// fixed scope set.
    #[must_use]
    pub fn twitter(client_id: String, client_secret: Option<String>, redirect_uri: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            authorization_endpoint: TWITTER_AUTHORIZE_URL.to_string(),
            token_endpoint: TWITTER_TOKEN_URL.to_string(),
            scopes: TWITTER_SCOPES.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Point the token endpoint elsewhere (mock servers, proxies).
    #[must_use]
    pub fn with_token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.token_endpoint = endpoint.into();
        self
    }

    /// Space-separated scope list.
    #[must_use]
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }
}

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("redirect_uri", &self.redirect_uri)
            .field("authorization_endpoint", &self.authorization_endpoint)
            .field("token_endpoint", &self.token_endpoint)
            .field("scopes", &self.scopes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_converts_with_expiry() {
        let response: TokenResponse = serde_json::from_str(
            r#"{"token_type":"bearer","expires_in":7200,"access_token":"a","refresh_token":"r","scope":"tweet.write"}"#,
        )
        .expect("response parses");

        let tokens = TokenSet::from(response);
        assert_eq!(tokens.access_token, "a");
        assert_eq!(tokens.refresh_token.as_deref(), Some("r"));
        assert!(tokens.expires_at.is_some());
    }

    #[test]
    fn token_response_without_expiry() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token":"a"}"#).expect("response parses");
        let tokens = TokenSet::from(response);
        assert!(tokens.refresh_token.is_none());
        assert!(tokens.expires_at.is_none());
        assert_eq!(tokens.token_type, "bearer");
    }

    #[test]
    fn twitter_config_has_fixed_scopes() {
        let config = OAuthConfig::twitter("id".into(), None, "https://cb".into());
        assert_eq!(config.scope_string(), "tweet.write tweet.read users.read offline.access");
    }

    #[test]
    fn debug_output_hides_tokens() {
        let tokens = TokenSet::new("secret-access".into(), Some("secret-refresh".into()), None, None);
        let rendered = format!("{tokens:?}");
        assert!(!rendered.contains("secret-access"));
        assert!(!rendered.contains("secret-refresh"));
    }
}
