//! Fake posting provider recording every call.

use async_trait::async_trait;
use launchbot_core::PostingProvider;
use launchbot_domain::{
    LaunchBotError, PostReceipt, RecentPost, Result as DomainResult, UserIdentity,
};
use parking_lot::Mutex;
use serde_json::json;

#[derive(Default)]
pub struct FakePostingProvider {
    posts: Mutex<Vec<String>>,
    tokens_seen: Mutex<Vec<String>>,
    recent: Mutex<Vec<RecentPost>>,
    timeline_fetches: Mutex<usize>,
    fail_posts: Mutex<bool>,
}

impl FakePostingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_recent_posts(&self, posts: Vec<RecentPost>) {
        *self.recent.lock() = posts;
    }

    pub fn fail_posts(&self) {
        *self.fail_posts.lock() = true;
    }

    /// Texts published so far.
    pub fn posts(&self) -> Vec<String> {
        self.posts.lock().clone()
    }

    /// Access tokens presented on each call.
    pub fn tokens_seen(&self) -> Vec<String> {
        self.tokens_seen.lock().clone()
    }

    pub fn timeline_fetches(&self) -> usize {
        *self.timeline_fetches.lock()
    }
}

#[async_trait]
impl PostingProvider for FakePostingProvider {
    async fn me(&self, access_token: &str) -> DomainResult<UserIdentity> {
        self.tokens_seen.lock().push(access_token.to_string());
        Ok(UserIdentity {
            id: "42".into(),
            name: "F1 Launch Bot".into(),
            username: "f1launchbot".into(),
        })
    }

    async fn recent_posts(
        &self,
        access_token: &str,
        user_id: &str,
        max_results: u32,
    ) -> DomainResult<Vec<RecentPost>> {
        assert_eq!(user_id, "42");
        self.tokens_seen.lock().push(access_token.to_string());
        *self.timeline_fetches.lock() += 1;
        Ok(self.recent.lock().iter().take(max_results as usize).cloned().collect())
    }

    async fn create_post(&self, access_token: &str, text: &str) -> DomainResult<PostReceipt> {
        self.tokens_seen.lock().push(access_token.to_string());
        if *self.fail_posts.lock() {
            return Err(LaunchBotError::Provider("403 duplicate content".into()));
        }
        let mut posts = self.posts.lock();
        posts.push(text.to_string());
        Ok(PostReceipt::from_data(json!({ "id": posts.len().to_string(), "text": text })))
    }
}
