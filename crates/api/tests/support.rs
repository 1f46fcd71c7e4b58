#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use launchbot_api::{router, AppContext};
use launchbot_common::auth::{OAuthClient, OAuthConfig};
use launchbot_core::CredentialStore;
use launchbot_domain::{
    AnnouncementConfig, Config, CredentialRecord, Environment, LoggingConfig, OAuthAppConfig,
    ScheduleConfig, ServerConfig, StorageConfig,
};
use launchbot_infra::{HttpClient, TwitterApiClient};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::MockServer;

pub const CALLBACK_URL: &str = "https://bot.test/callback";

/// Config rooted in a temporary directory.
pub fn test_config(dir: &TempDir) -> Config {
    Config {
        oauth: OAuthAppConfig {
            client_id: "client".into(),
            client_secret: None,
            callback_url: CALLBACK_URL.into(),
            local_callback_url: None,
        },
        environment: Environment::Deployed,
        storage: StorageConfig {
            database_path: dir.path().join("launchbot.db").to_string_lossy().into_owned(),
            credential_path: "tokens/twitter".into(),
        },
        server: ServerConfig::default(),
        announcements: AnnouncementConfig::default(),
        schedule: ScheduleConfig::default(),
        logging: LoggingConfig::default(),
    }
}

/// Context whose token endpoint and posting API are served by `server`.
pub struct TestApp {
    pub ctx: Arc<AppContext>,
    pub server: MockServer,
    _dir: TempDir,
}

impl TestApp {
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    pub async fn start_with(customize: impl FnOnce(&mut Config)) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let server = MockServer::start().await;

        let mut config = test_config(&dir);
        customize(&mut config);

        let oauth = OAuthClient::new(
            OAuthConfig::twitter(
                config.oauth.client_id.clone(),
                config.oauth.client_secret.clone(),
                config.callback_url().to_string(),
            )
            .with_token_endpoint(format!("{}/2/oauth2/token", server.uri())),
        );
        let provider = TwitterApiClient::new(HttpClient::new().expect("http client"))
            .with_api_url(server.uri());

        let ctx = AppContext::new_with_clients(config, oauth, provider)
            .await
            .expect("context builds");

        Self { ctx: Arc::new(ctx), server, _dir: dir }
    }

    pub async fn seed_tokens(&self, access: &str, refresh: &str) {
        self.ctx
            .credentials
            .set(&CredentialRecord::tokens(access, Some(refresh.to_string())))
            .await
            .expect("seed tokens");
    }

    pub async fn stored(&self) -> Option<CredentialRecord> {
        self.ctx.credentials.get().await.expect("read credentials")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).expect("request")).await
    }

    pub async fn post(&self, uri: &str) -> Response<Body> {
        self.send(Request::post(uri).body(Body::empty()).expect("request")).await
    }

    async fn send(&self, request: Request<Body>) -> Response<Body> {
        router(self.ctx.clone()).oneshot(request).await.expect("router responds")
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body").to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).expect("utf8 body")
}
