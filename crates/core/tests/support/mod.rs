//! Shared test helpers for `launchbot-core` integration tests.
//!
//! These helpers provide fake provider endpoints and a wired-up service so
//! the flow and announcement tests can focus on behaviour instead of
//! boilerplate.

#![allow(dead_code)]

pub mod oauth;
pub mod posting;

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use launchbot_core::{
    AnnouncementService, AnnouncementSettings, InMemoryCredentialStore, InMemoryEventRepository,
    OAuthFlowController,
};
use launchbot_domain::{CredentialRecord, EventRecord};

pub use oauth::FakeOAuthClient;
pub use posting::FakePostingProvider;

/// 2025-02-10 (a Monday) at the given UTC time.
pub fn feb10(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 10, hour, minute, 0).unwrap()
}

/// Everything an announcement test needs to poke at.
pub struct Harness {
    pub oauth: Arc<FakeOAuthClient>,
    pub store: Arc<InMemoryCredentialStore>,
    pub provider: Arc<FakePostingProvider>,
    pub events: Arc<InMemoryEventRepository>,
    pub flow: Arc<OAuthFlowController>,
    pub service: AnnouncementService,
}

impl Harness {
    /// Authenticated store holding `refresh-0`, provider accepting it.
    pub fn authenticated(events: Vec<EventRecord>) -> Self {
        Self::build(
            Some(CredentialRecord::tokens("access-0", Some("refresh-0".into()))),
            events,
            AnnouncementSettings::default(),
        )
    }

    pub fn build(
        record: Option<CredentialRecord>,
        events: Vec<EventRecord>,
        settings: AnnouncementSettings,
    ) -> Self {
        let oauth = Arc::new(FakeOAuthClient::new("refresh-0"));
        let store = Arc::new(match record {
            Some(record) => InMemoryCredentialStore::with_record(record),
            None => InMemoryCredentialStore::new(),
        });
        let provider = Arc::new(FakePostingProvider::new());
        let events = Arc::new(InMemoryEventRepository::new(events));

        let flow = Arc::new(OAuthFlowController::new(
            oauth.clone(),
            store.clone(),
            provider.clone(),
        ));
        let service = AnnouncementService::new(flow.clone(), events.clone(), settings);

        Self { oauth, store, provider, events, flow, service }
    }

    pub fn stored_refresh_token(&self) -> Option<String> {
        self.store.snapshot().and_then(|r| r.refresh_token)
    }
}
