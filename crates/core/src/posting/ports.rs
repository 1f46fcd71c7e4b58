//! Posting provider port interfaces

use async_trait::async_trait;
use launchbot_domain::{PostReceipt, RecentPost, Result, UserIdentity};

/// Social-media account operations, all authorized by a bearer token.
#[async_trait]
pub trait PostingProvider: Send + Sync {
    /// Identity of the authorized account.
    async fn me(&self, access_token: &str) -> Result<UserIdentity>;

    /// Most recent original posts (replies and reposts excluded), newest first.
    async fn recent_posts(
        &self,
        access_token: &str,
        user_id: &str,
        max_results: u32,
    ) -> Result<Vec<RecentPost>>;

    /// Publish a text post.
    async fn create_post(&self, access_token: &str, text: &str) -> Result<PostReceipt>;
}
