//! Fake OAuth token endpoint with single-use refresh tokens.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use launchbot_common::auth::{OAuthClientError, OAuthClientTrait, PKCEChallenge, TokenSet};
use parking_lot::Mutex;

/// Mirrors the provider's rotation: each refresh token works exactly once
/// and is replaced by `refresh-{n}`.
pub struct FakeOAuthClient {
    valid_refresh: Mutex<String>,
    issued: AtomicUsize,
    exchanges: AtomicUsize,
    refreshes: AtomicUsize,
    rotate: bool,
}

impl FakeOAuthClient {
    pub fn new(valid_refresh: &str) -> Self {
        Self {
            valid_refresh: Mutex::new(valid_refresh.to_string()),
            issued: AtomicUsize::new(0),
            exchanges: AtomicUsize::new(0),
            refreshes: AtomicUsize::new(0),
            rotate: true,
        }
    }

    /// Provider that keeps the refresh token and omits it from responses.
    pub fn without_rotation(mut self) -> Self {
        self.rotate = false;
        self
    }

    pub fn exchanges(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    fn next_pair(&self) -> TokenSet {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let refresh = format!("refresh-{n}");
        *self.valid_refresh.lock() = refresh.clone();
        TokenSet::new(format!("access-{n}"), Some(refresh), Some(7200), None)
    }
}

#[async_trait]
impl OAuthClientTrait for FakeOAuthClient {
    fn authorization_url(&self, challenge: &PKCEChallenge) -> String {
        format!(
            "https://provider.test/authorize?state={}&code_challenge={}",
            challenge.state, challenge.code_challenge
        )
    }

    async fn exchange_code_for_tokens(
        &self,
        code: &str,
        _code_verifier: &str,
    ) -> Result<TokenSet, OAuthClientError> {
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        if code == "bad-code" {
            return Err(OAuthClientError::Rejected {
                status: 400,
                message: "invalid_grant".into(),
            });
        }
        Ok(self.next_pair())
    }

    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenSet, OAuthClientError> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        if refresh_token != self.valid_refresh.lock().as_str() {
            return Err(OAuthClientError::Rejected {
                status: 400,
                message: "invalid_request: Value passed for the token was invalid.".into(),
            });
        }
        if !self.rotate {
            let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            return Ok(TokenSet::new(format!("access-{n}"), None, Some(7200), None));
        }
        Ok(self.next_pair())
    }

    fn redirect_uri(&self) -> &str {
        "https://bot.test/callback"
    }
}
