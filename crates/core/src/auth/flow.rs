//! OAuth2 authorization-code + PKCE flow with refresh-token rotation.
//!
//! The controller owns three transitions over the single credential record:
//! - `begin_authorization`: store a fresh `{state, code_verifier}` session
//! - `complete_authorization`: verify state, exchange the code, store tokens
//! - `refresh_and_get_client`: rotate the refresh token before any work
//!
//! Refresh tokens are single-use at the provider, so the rotated pair is
//! persisted before the caller gets a client back.

use std::sync::Arc;

use launchbot_common::auth::{OAuthClientError, OAuthClientTrait, PKCEChallenge};
use launchbot_domain::{AuthPhase, CredentialRecord, LaunchBotError, Result, UserIdentity};
use tracing::{debug, info, instrument, warn};

use super::ports::CredentialStore;
use crate::posting::ports::PostingProvider;
use crate::posting::AuthenticatedClient;

/// Where to send the operator to grant access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRedirect {
    pub url: String,
    pub state: String,
}

/// Result of a successful callback.
#[derive(Debug, Clone)]
pub struct AuthorizedAccount {
    pub client: AuthenticatedClient,
    pub identity: UserIdentity,
}

/// Drives the credential lifecycle against a [`CredentialStore`].
pub struct OAuthFlowController {
    oauth: Arc<dyn OAuthClientTrait>,
    store: Arc<dyn CredentialStore>,
    provider: Arc<dyn PostingProvider>,
}

impl OAuthFlowController {
    pub fn new(
        oauth: Arc<dyn OAuthClientTrait>,
        store: Arc<dyn CredentialStore>,
        provider: Arc<dyn PostingProvider>,
    ) -> Self {
        Self { oauth, store, provider }
    }

    /// Generate a PKCE session, persist it and return the authorization URL.
    ///
    /// Any stored tokens are replaced by the new session.
    #[instrument(skip(self))]
    pub async fn begin_authorization(&self) -> Result<AuthorizationRedirect> {
        let challenge = PKCEChallenge::generate();
        let url = self.oauth.authorization_url(&challenge);

        self.store
            .set(&CredentialRecord::session(&challenge.state, &challenge.code_verifier))
            .await?;

        info!(redirect_uri = self.oauth.redirect_uri(), "authorization session started");
        Ok(AuthorizationRedirect { url, state: challenge.state })
    }

    /// Handle the provider callback.
    ///
    /// # Errors
    /// - `StateMismatch` if no session is stored or `received_state` differs;
    ///   nothing is exchanged or written in that case
    /// - `ProviderAuth` if the provider rejects the code
    #[instrument(skip(self, received_state, code))]
    pub async fn complete_authorization(
        &self,
        received_state: &str,
        code: &str,
    ) -> Result<AuthorizedAccount> {
        let session = self
            .store
            .get()
            .await?
            .and_then(|record| record.pending_session())
            .ok_or(LaunchBotError::StateMismatch)?;

        if session.state != received_state {
            warn!("callback state does not match stored session");
            return Err(LaunchBotError::StateMismatch);
        }

        let tokens = self
            .oauth
            .exchange_code_for_tokens(code, &session.code_verifier)
            .await
            .map_err(provider_error)?;

        self.store
            .set(&CredentialRecord::tokens(&tokens.access_token, tokens.refresh_token.clone()))
            .await?;
        info!("authorization code exchanged, tokens stored");

        let client = AuthenticatedClient::new(
            Arc::clone(&self.provider),
            tokens.access_token,
            AuthPhase::Authenticated,
        );
        let identity = client.me().await?;

        Ok(AuthorizedAccount { client, identity })
    }

    /// Rotate the stored refresh token and return a ready client.
    ///
    /// # Errors
    /// - `NoCredentials` if no refresh token is stored; the store is untouched
    /// - `ProviderAuth` if the provider rejects the refresh token
    #[instrument(skip(self))]
    pub async fn refresh_and_get_client(&self) -> Result<AuthenticatedClient> {
        let record = self.store.get().await?;
        let stored_refresh = record
            .as_ref()
            .and_then(|r| r.refresh_token())
            .map(str::to_owned)
            .ok_or(LaunchBotError::NoCredentials)?;

        let tokens =
            self.oauth.refresh_access_token(&stored_refresh).await.map_err(provider_error)?;

        let refresh_token = match tokens.refresh_token {
            Some(rotated) if !rotated.is_empty() => Some(rotated),
            _ => {
                debug!("provider did not rotate the refresh token, keeping the stored one");
                Some(stored_refresh)
            }
        };

        self.store.set(&CredentialRecord::tokens(&tokens.access_token, refresh_token)).await?;
        debug!("refreshed token pair persisted");

        Ok(AuthenticatedClient::new(
            Arc::clone(&self.provider),
            tokens.access_token,
            AuthPhase::Refreshed,
        ))
    }
}

fn provider_error(err: OAuthClientError) -> LaunchBotError {
    match err {
        OAuthClientError::RequestFailed(e) => LaunchBotError::Network(e.to_string()),
        other => LaunchBotError::ProviderAuth(other.to_string()),
    }
}
