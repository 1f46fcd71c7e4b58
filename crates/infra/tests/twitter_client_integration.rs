//! Integration tests for the X/Twitter client against a mock API server.

use launchbot_core::PostingProvider;
use launchbot_domain::LaunchBotError;
use launchbot_infra::{HttpClient, TwitterApiClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TwitterApiClient {
    let http = HttpClient::new().expect("http client builds");
    TwitterApiClient::new(http).with_api_url(server.uri())
}

#[tokio::test]
async fn me_returns_identity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/users/me"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": "42", "name": "F1 Launch Bot", "username": "f1launchbot" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let identity = client_for(&server).me("access-1").await.expect("identity");

    assert_eq!(identity.id, "42");
    assert_eq!(identity.username, "f1launchbot");
}

#[tokio::test]
async fn recent_posts_excludes_replies_and_reposts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/users/42/tweets"))
        .and(query_param("exclude", "replies,retweets"))
        .and(query_param("max_results", "5"))
        .and(query_param("tweet.fields", "created_at"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": "3", "text": "newest", "created_at": "2025-02-10T11:30:00.000Z" },
                { "id": "2", "text": "older", "created_at": "2025-02-10T08:00:00.000Z" },
                { "id": "1", "text": "oldest", "created_at": "2025-02-09T08:00:00.000Z" }
            ],
            "meta": { "result_count": 3 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let posts = client_for(&server).recent_posts("access-1", "42", 2).await.expect("timeline");

    assert_eq!(posts.len(), 2, "results are truncated to the requested count");
    assert_eq!(posts[0].id, "3");
    assert!(posts[0].created_at.is_some());
}

#[tokio::test]
async fn empty_timeline_has_no_posts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/users/42/tweets"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "meta": { "result_count": 0 } })),
        )
        .mount(&server)
        .await;

    let posts = client_for(&server).recent_posts("access-1", "42", 5).await.expect("timeline");
    assert!(posts.is_empty());
}

#[tokio::test]
async fn create_post_sends_text_and_keeps_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .and(header("authorization", "Bearer access-1"))
        .and(body_json(json!({ "text": "hello paddock" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "id": "1889", "text": "hello paddock", "edit_history_tweet_ids": ["1889"] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let receipt =
        client_for(&server).create_post("access-1", "hello paddock").await.expect("post created");

    assert_eq!(receipt.id.as_deref(), Some("1889"));
    assert_eq!(receipt.data["edit_history_tweet_ids"][0], "1889");
}

#[tokio::test]
async fn rejected_post_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(503).set_body_string("over capacity"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).create_post("access-1", "hello").await.expect_err("fails");
    assert!(matches!(err, LaunchBotError::Provider(msg) if msg.contains("503")));
}

#[tokio::test]
async fn unauthorized_maps_to_provider_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "title": "Unauthorized",
            "type": "about:blank",
            "status": 401,
            "detail": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).me("expired").await.expect_err("fails");
    assert!(matches!(err, LaunchBotError::ProviderAuth(msg) if msg == "HTTP 401: Unauthorized"));
}

#[tokio::test]
async fn duplicate_content_reports_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "You are not allowed to create a Tweet with duplicate content.",
            "type": "about:blank",
            "title": "Forbidden",
            "status": 403
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).create_post("access-1", "again").await.expect_err("fails");
    assert!(matches!(err, LaunchBotError::ProviderAuth(msg) if msg.contains("duplicate content")));
}
