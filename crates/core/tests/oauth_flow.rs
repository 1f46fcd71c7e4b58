//! Credential lifecycle tests against fake provider endpoints.

mod support;

use launchbot_core::{AnnouncementSettings, CredentialStore};
use launchbot_domain::{AuthPhase, CredentialRecord, LaunchBotError};
use support::{FakeOAuthClient, Harness};

fn unauthenticated() -> Harness {
    Harness::build(None, Vec::new(), AnnouncementSettings::default())
}

#[tokio::test]
async fn begin_authorization_stores_session() {
    let h = unauthenticated();

    let redirect = h.flow.begin_authorization().await.unwrap();

    let record = h.store.snapshot().unwrap();
    assert_eq!(record.phase(), AuthPhase::Authorizing);
    assert_eq!(record.state.as_deref(), Some(redirect.state.as_str()));
    assert!(redirect.url.contains(&format!("state={}", redirect.state)));
    assert!(record.access_token.is_none());
}

#[tokio::test]
async fn begin_authorization_replaces_existing_tokens() {
    let h = Harness::authenticated(Vec::new());

    h.flow.begin_authorization().await.unwrap();

    let record = h.store.snapshot().unwrap();
    assert!(record.refresh_token.is_none());
    assert!(record.pending_session().is_some());
}

#[tokio::test]
async fn callback_with_matching_state_stores_tokens() {
    let h = unauthenticated();
    let redirect = h.flow.begin_authorization().await.unwrap();

    let account = h.flow.complete_authorization(&redirect.state, "auth-code").await.unwrap();

    assert_eq!(account.identity.username, "f1launchbot");
    assert_eq!(account.client.phase(), AuthPhase::Authenticated);
    assert_eq!(h.oauth.exchanges(), 1);
    assert_eq!(
        h.store.snapshot(),
        Some(CredentialRecord::tokens("access-1", Some("refresh-1".into())))
    );
    assert_eq!(h.provider.tokens_seen(), vec!["access-1".to_string()]);
}

#[tokio::test]
async fn callback_with_wrong_state_is_rejected_without_exchange() {
    let h = unauthenticated();
    h.flow.begin_authorization().await.unwrap();
    let before = h.store.snapshot();

    let err = h.flow.complete_authorization("forged-state", "auth-code").await.unwrap_err();

    assert_eq!(err, LaunchBotError::StateMismatch);
    assert_eq!(h.oauth.exchanges(), 0);
    assert_eq!(h.store.writes(), 1);
    assert_eq!(h.store.snapshot(), before);
}

#[tokio::test]
async fn callback_without_session_is_a_state_mismatch() {
    let h = Harness::authenticated(Vec::new());

    let err = h.flow.complete_authorization("any", "auth-code").await.unwrap_err();

    assert_eq!(err, LaunchBotError::StateMismatch);
    assert_eq!(h.oauth.exchanges(), 0);
}

#[tokio::test]
async fn rejected_code_keeps_session() {
    let h = unauthenticated();
    let redirect = h.flow.begin_authorization().await.unwrap();

    let err = h.flow.complete_authorization(&redirect.state, "bad-code").await.unwrap_err();

    assert!(matches!(err, LaunchBotError::ProviderAuth(_)));
    assert!(h.store.snapshot().unwrap().pending_session().is_some());
}

#[tokio::test]
async fn consecutive_refreshes_rotate_the_stored_token() {
    let h = Harness::authenticated(Vec::new());

    let first = h.flow.refresh_and_get_client().await.unwrap();
    assert_eq!(first.phase(), AuthPhase::Refreshed);
    assert_eq!(h.stored_refresh_token().as_deref(), Some("refresh-1"));

    h.flow.refresh_and_get_client().await.unwrap();
    assert_eq!(h.stored_refresh_token().as_deref(), Some("refresh-2"));
    assert_eq!(h.oauth.refreshes(), 2);
}

#[tokio::test]
async fn stale_refresh_token_is_a_provider_auth_error() {
    let h = Harness::build(
        Some(CredentialRecord::tokens("old", Some("refresh-stale".into()))),
        Vec::new(),
        AnnouncementSettings::default(),
    );

    let err = h.flow.refresh_and_get_client().await.unwrap_err();

    assert!(matches!(err, LaunchBotError::ProviderAuth(msg) if msg.contains("invalid_request")));
    assert_eq!(h.store.writes(), 0);
}

#[tokio::test]
async fn empty_store_has_no_credentials() {
    let h = unauthenticated();

    let err = h.flow.refresh_and_get_client().await.unwrap_err();

    assert_eq!(err, LaunchBotError::NoCredentials);
    assert_eq!(h.oauth.refreshes(), 0);
    assert_eq!(h.store.writes(), 0);
}

#[tokio::test]
async fn session_only_record_has_no_credentials() {
    let h = Harness::build(
        Some(CredentialRecord::session("state", "verifier")),
        Vec::new(),
        AnnouncementSettings::default(),
    );

    let err = h.flow.refresh_and_get_client().await.unwrap_err();

    assert_eq!(err, LaunchBotError::NoCredentials);
}

#[tokio::test]
async fn missing_rotated_token_keeps_the_previous_one() {
    use std::sync::Arc;

    use launchbot_core::{InMemoryCredentialStore, OAuthFlowController};

    let store = Arc::new(InMemoryCredentialStore::with_record(CredentialRecord::tokens(
        "access-0",
        Some("refresh-0".into()),
    )));
    let flow = OAuthFlowController::new(
        Arc::new(FakeOAuthClient::new("refresh-0").without_rotation()),
        store.clone(),
        Arc::new(support::FakePostingProvider::new()),
    );

    flow.refresh_and_get_client().await.unwrap();

    let record = store.get().await.unwrap().unwrap();
    assert_eq!(record.access_token.as_deref(), Some("access-1"));
    assert_eq!(record.refresh_token.as_deref(), Some("refresh-0"));
}
