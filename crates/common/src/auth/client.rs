//! OAuth 2.0 client implementation with PKCE support
//!
//! Handles the HTTP side of the authorization flow:
//! - Authorization URL building
//! - Authorization code exchange
//! - Refresh-token rotation
//!
//! Confidential clients authenticate to the token endpoint with HTTP Basic;
//! public clients send `client_id` in the form body only.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use super::pkce::PKCEChallenge;
use super::traits::OAuthClientTrait;
use super::types::{OAuthConfig, OAuthErrorResponse, TokenResponse, TokenSet};

/// Error type for OAuth client operations
#[derive(Debug, Error)]
pub enum OAuthClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Token endpoint answered with an error
    #[error("OAuth error ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Response body could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// No refresh token supplied
    #[error("No refresh token available")]
    NoRefreshToken,
}

impl OAuthClientError {
    /// Whether the provider itself refused the grant.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::NoRefreshToken)
    }
}

/// OAuth 2.0 client for the authorization-code + PKCE grant.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    config: OAuthConfig,
    client: Client,
}

impl OAuthClient {
    /// Create a new OAuth client with the given configuration
    ///
    /// # Examples
    /// ```
    /// use launchbot_common::auth::{OAuthClient, OAuthConfig};
    ///
    /// let config = OAuthConfig::twitter(
    ///     "client_id".to_string(),
    ///     None,
    ///     "http://localhost:8080/callback".to_string(),
    /// );
    /// let client = OAuthClient::new(config);
    /// assert_eq!(client.redirect_uri(), "http://localhost:8080/callback");
    /// ```
    #[must_use]
    pub fn new(config: OAuthConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { config, client }
    }

    /// Build the browser authorization URL for a challenge.
    #[must_use]
    pub fn authorization_url(&self, challenge: &PKCEChallenge) -> String {
        let scope = self.config.scope_string();
        let params = [
            ("response_type", "code"),
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("scope", scope.as_str()),
            ("state", challenge.state.as_str()),
            ("code_challenge", challenge.code_challenge.as_str()),
            ("code_challenge_method", challenge.challenge_method()),
        ];

        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.config.authorization_endpoint, query)
    }

    /// Exchange an authorization code for tokens.
    ///
    /// # Errors
    /// Returns error if the request fails, the provider rejects the code, or
    /// the response cannot be parsed
    pub async fn exchange_code_for_tokens(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<TokenSet, OAuthClientError> {
        let form = [
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code_verifier", code_verifier),
        ];

        debug!("exchanging authorization code");
        self.post_token_form(&form).await
    }

    /// Exchange a refresh token for a new pair.
    ///
    /// The provider rotates refresh tokens: the one passed in is invalid
    /// once this call succeeds.
    ///
    /// # Errors
    /// Returns error if the token is empty, stale or revoked
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenSet, OAuthClientError> {
        if refresh_token.is_empty() {
            return Err(OAuthClientError::NoRefreshToken);
        }

        let form = [
            ("grant_type", "refresh_token"),
            ("client_id", self.config.client_id.as_str()),
            ("refresh_token", refresh_token),
        ];

        debug!("refreshing access token");
        self.post_token_form(&form).await
    }

    /// Get the configured redirect URI
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.config.redirect_uri
    }

    /// Get a reference to the OAuth configuration
    #[must_use]
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    async fn post_token_form(&self, form: &[(&str, &str)]) -> Result<TokenSet, OAuthClientError> {
        let mut request = self.client.post(&self.config.token_endpoint).form(form);
        if let Some(secret) = &self.config.client_secret {
            request = request.basic_auth(&self.config.client_id, Some(secret));
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OAuthErrorResponse>(&body)
                .map(|e| e.to_string())
                .unwrap_or(body);
            warn!(status = status.as_u16(), "token endpoint rejected request");
            return Err(OAuthClientError::Rejected { status: status.as_u16(), message });
        }

        let token_response: TokenResponse =
            response.json().await.map_err(|e| OAuthClientError::ParseError(e.to_string()))?;

        Ok(token_response.into())
    }
}

#[async_trait]
impl OAuthClientTrait for OAuthClient {
    fn authorization_url(&self, challenge: &PKCEChallenge) -> String {
        self.authorization_url(challenge)
    }

    async fn exchange_code_for_tokens(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<TokenSet, OAuthClientError> {
        self.exchange_code_for_tokens(code, code_verifier).await
    }

    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenSet, OAuthClientError> {
        self.refresh_access_token(refresh_token).await
    }

    fn redirect_uri(&self) -> &str {
        self.redirect_uri()
    }
}
