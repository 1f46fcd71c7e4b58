//! X/Twitter v2 client implementing the posting provider port.

use async_trait::async_trait;
use launchbot_core::PostingProvider;
use launchbot_domain::{LaunchBotError, PostReceipt, RecentPost, Result, UserIdentity};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::types::{ApiProblem, CreatePostRequest, DataEnvelope, PostData, UserData};
use crate::http::HttpClient;

pub const TWITTER_API_URL: &str = "https://api.twitter.com";

/// Bounds accepted by the timeline endpoint for `max_results`.
const TIMELINE_MIN_RESULTS: u32 = 5;
const TIMELINE_MAX_RESULTS: u32 = 100;

/// Bearer-token client for the v2 API.
#[derive(Clone)]
pub struct TwitterApiClient {
    http_client: HttpClient,
    api_url: String,
}

impl TwitterApiClient {
    pub fn new(http_client: HttpClient) -> Self {
        Self { http_client, api_url: TWITTER_API_URL.to_string() }
    }

    /// Point the client at another host (mock servers in tests).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Url::parse(&self.api_url)
            .and_then(|base| base.join(path))
            .map_err(|e| LaunchBotError::Config(format!("invalid API url '{}': {e}", self.api_url)))
    }

    async fn read_data<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LaunchBotError::Network(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let envelope: DataEnvelope<T> = serde_json::from_str(&body)
            .map_err(|e| LaunchBotError::Provider(format!("unexpected response body: {e}")))?;
        for problem in &envelope.errors {
            warn!(problem = problem.summary().unwrap_or("unknown"), "partial API error");
        }
        Ok(envelope.data)
    }
}

#[async_trait]
impl PostingProvider for TwitterApiClient {
    #[instrument(skip(self, access_token))]
    async fn me(&self, access_token: &str) -> Result<UserIdentity> {
        let url = self.endpoint("/2/users/me")?;
        let response = self
            .http_client
            .send(self.http_client.request(Method::GET, url).bearer_auth(access_token))
            .await?;

        let user: UserData = Self::read_data(response)
            .await?
            .ok_or_else(|| LaunchBotError::Provider("identity response had no data".into()))?;
        debug!(user_id = %user.id, "identity resolved");
        Ok(user.into())
    }

    #[instrument(skip(self, access_token))]
    async fn recent_posts(
        &self,
        access_token: &str,
        user_id: &str,
        max_results: u32,
    ) -> Result<Vec<RecentPost>> {
        let mut url = self.endpoint(&format!("/2/users/{user_id}/tweets"))?;
        url.query_pairs_mut()
            .append_pair("exclude", "replies,retweets")
            .append_pair(
                "max_results",
                &max_results.clamp(TIMELINE_MIN_RESULTS, TIMELINE_MAX_RESULTS).to_string(),
            )
            .append_pair("tweet.fields", "created_at");

        let response = self
            .http_client
            .send(self.http_client.request(Method::GET, url).bearer_auth(access_token))
            .await?;

        let posts: Vec<PostData> = Self::read_data(response).await?.unwrap_or_default();
        debug!(count = posts.len(), "recent posts fetched");
        Ok(posts.into_iter().take(max_results as usize).map(RecentPost::from).collect())
    }

    #[instrument(skip(self, access_token, text), fields(chars = text.chars().count()))]
    async fn create_post(&self, access_token: &str, text: &str) -> Result<PostReceipt> {
        let url = self.endpoint("/2/tweets")?;
        let response = self
            .http_client
            .send(
                self.http_client
                    .request(Method::POST, url)
                    .bearer_auth(access_token)
                    .json(&CreatePostRequest { text }),
            )
            .await?;

        let data: serde_json::Value = Self::read_data(response)
            .await?
            .ok_or_else(|| LaunchBotError::PostFailed("create response had no data".into()))?;

        let receipt = PostReceipt::from_data(data);
        info!(post_id = receipt.id.as_deref().unwrap_or("unknown"), "post created");
        Ok(receipt)
    }
}

fn status_error(status: StatusCode, body: &str) -> LaunchBotError {
    let detail = serde_json::from_str::<ApiProblem>(body)
        .ok()
        .and_then(|p| p.summary().map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_string());
    let message = format!("HTTP {}: {}", status.as_u16(), detail);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LaunchBotError::ProviderAuth(message),
        _ => LaunchBotError::Provider(message),
    }
}
