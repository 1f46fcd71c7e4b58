//! Traits for OAuth operations
//!
//! The seam lets the flow controller run against mock token endpoints in
//! tests.

use async_trait::async_trait;

use super::client::OAuthClientError;
use super::pkce::PKCEChallenge;
use super::types::TokenSet;

/// OAuth client operations used by the authorization flow.
#[async_trait]
pub trait OAuthClientTrait: Send + Sync {
    /// Authorization URL carrying the challenge, state and fixed scopes.
    fn authorization_url(&self, challenge: &PKCEChallenge) -> String;

    /// Exchange an authorization code plus its PKCE verifier for tokens.
    ///
    /// # Errors
    /// Returns error if the provider rejects the exchange or the response
    /// cannot be parsed
    async fn exchange_code_for_tokens(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<TokenSet, OAuthClientError>;

    /// Exchange a refresh token for a new token pair.
    ///
    /// # Errors
    /// Returns error if the refresh token is empty, stale or revoked
    async fn refresh_access_token(&self, refresh_token: &str)
        -> Result<TokenSet, OAuthClientError>;

    /// Callback address registered with the provider.
    fn redirect_uri(&self) -> &str;
}
