//! Provider handle bound to a fresh access token.

use std::fmt;
use std::sync::Arc;

use launchbot_domain::{AuthPhase, PostReceipt, RecentPost, Result, UserIdentity};

use super::ports::PostingProvider;

/// A [`PostingProvider`] paired with the access token it should use.
///
/// Only the flow controller hands these out, so holding one implies the
/// stored credentials were just exchanged or rotated.
#[derive(Clone)]
pub struct AuthenticatedClient {
    provider: Arc<dyn PostingProvider>,
    access_token: String,
    phase: AuthPhase,
}

impl AuthenticatedClient {
    pub fn new(provider: Arc<dyn PostingProvider>, access_token: String, phase: AuthPhase) -> Self {
        Self { provider, access_token, phase }
    }

    /// `Authenticated` after a callback, `Refreshed` after a rotation.
    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub async fn me(&self) -> Result<UserIdentity> {
        self.provider.me(&self.access_token).await
    }

    /// The account's latest original posts, newest first.
    pub async fn recent_original_posts(&self, max_results: u32) -> Result<Vec<RecentPost>> {
        let me = self.me().await?;
        self.provider.recent_posts(&self.access_token, &me.id, max_results).await
    }

    pub async fn post(&self, text: &str) -> Result<PostReceipt> {
        self.provider.create_post(&self.access_token, text).await
    }
}

impl fmt::Debug for AuthenticatedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedClient")
            .field("access_token", &"[REDACTED]")
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
