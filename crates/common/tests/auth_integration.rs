//! Integration tests for the OAuth client against a mock token endpoint.

use launchbot_common::auth::{OAuthClient, OAuthClientError, OAuthConfig, PKCEChallenge};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, secret: Option<&str>) -> OAuthClient {
    let config = OAuthConfig::twitter(
        "id".to_string(),
        secret.map(str::to_string),
        "http://localhost:8080/callback".to_string(),
    )
    .with_token_endpoint(format!("{}/2/oauth2/token", server.uri()));
    OAuthClient::new(config)
}

#[tokio::test]
async fn code_exchange_sends_verifier_and_basic_auth() {
    let server = MockServer::start().await;
    let challenge = PKCEChallenge::generate();

    Mock::given(method("POST"))
        .and(path("/2/oauth2/token"))
        .and(header("authorization", "Basic aWQ6c2VjcmV0"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code"))
        .and(body_string_contains(format!("code_verifier={}", challenge.code_verifier)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token_type": "bearer",
            "expires_in": 7200,
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "scope": "tweet.write tweet.read users.read offline.access"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = client_for(&server, Some("secret"))
        .exchange_code_for_tokens("auth-code", &challenge.code_verifier)
        .await
        .expect("exchange succeeds");

    assert_eq!(tokens.access_token, "access-1");
    assert_eq!(tokens.refresh_token.as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn refresh_returns_rotated_pair() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2/oauth2/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token_type": "bearer",
            "access_token": "access-2",
            "refresh_token": "refresh-2"
        })))
        .mount(&server)
        .await;

    let tokens = client_for(&server, None)
        .refresh_access_token("refresh-1")
        .await
        .expect("refresh succeeds");

    assert_eq!(tokens.access_token, "access-2");
    assert_eq!(tokens.refresh_token.as_deref(), Some("refresh-2"));
}

#[tokio::test]
async fn stale_refresh_token_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_request",
            "error_description": "Value passed for the token was invalid."
        })))
        .mount(&server)
        .await;

    let err = client_for(&server, None)
        .refresh_access_token("already-used")
        .await
        .expect_err("stale token must fail");

    match err {
        OAuthClientError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert!(message.starts_with("invalid_request"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn non_json_error_body_is_kept() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2/oauth2/token"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = client_for(&server, None)
        .exchange_code_for_tokens("code", "verifier")
        .await
        .expect_err("503 must fail");

    assert!(err.is_rejection());
    assert!(err.to_string().contains("upstream down"));
}
