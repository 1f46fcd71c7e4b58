//! Wire types for the X/Twitter v2 API
use chrono::{DateTime, Utc};
use launchbot_domain::{RecentPost, UserIdentity};
use serde::{Deserialize, Serialize};

/// Standard `{"data": ..., "errors": [...]}` response wrapper.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<ApiProblem>,
}

/// Problem details returned on failures (and inside partial `errors`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiProblem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiProblem {
    /// Most specific human-readable text available.
    pub fn summary(&self) -> Option<&str> {
        self.detail.as_deref().or(self.message.as_deref()).or(self.title.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub username: String,
}

impl From<UserData> for UserIdentity {
    fn from(user: UserData) -> Self {
        Self { id: user.id, name: user.name, username: user.username }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostData {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<PostData> for RecentPost {
    fn from(post: PostData) -> Self {
        Self { id: post.id, text: post.text, created_at: post.created_at }
    }
}

/// `POST /2/tweets` body.
#[derive(Debug, Serialize)]
pub struct CreatePostRequest<'a> {
    pub text: &'a str,
}
