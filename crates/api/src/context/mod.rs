//! Application context - dependency injection container

use std::sync::Arc;

use launchbot_common::auth::{OAuthClient, OAuthConfig};
use launchbot_core::{
    AnnouncementService, AnnouncementSettings, CredentialStore, OAuthFlowController,
};
use launchbot_domain::{AuthPhase, Config, LaunchBotError, Result};
use launchbot_infra::{
    AnnouncementScheduler, AnnouncementSchedulerConfig, DbManager, HttpClient,
    SqliteCredentialStore, SqliteEventRepository, TwitterApiClient,
};
use tokio::sync::Mutex;

use crate::utils::health::{ComponentHealth, HealthStatus};

const DB_POOL_SIZE: u32 = 4;
const USER_AGENT: &str = concat!("launchbot/", env!("CARGO_PKG_VERSION"));

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub credentials: Arc<SqliteCredentialStore>,
    pub events: Arc<SqliteEventRepository>,
    pub flow: Arc<OAuthFlowController>,
    pub announcements: Arc<AnnouncementService>,
    scheduler: Mutex<Option<AnnouncementScheduler>>,
}

impl AppContext {
    /// Wire the production adapters for `config`.
    pub async fn new_with_config(config: Config) -> Result<Self> {
        let oauth = OAuthClient::new(OAuthConfig::twitter(
            config.oauth.client_id.clone(),
            config.oauth.client_secret.clone(),
            config.callback_url().to_string(),
        ));
        let http = HttpClient::builder().user_agent(USER_AGENT).build()?;
        let provider = TwitterApiClient::new(http);

        Self::new_with_clients(config, oauth, provider).await
    }

    /// Wire the context around pre-built provider clients.
    pub async fn new_with_clients(
        config: Config,
        oauth: OAuthClient,
        provider: TwitterApiClient,
    ) -> Result<Self> {
        let settings = AnnouncementSettings::from_config(&config.announcements)?;

        let db_path = config.storage.database_path.clone();
        let db = tokio::task::spawn_blocking(move || -> Result<DbManager> {
            let db = DbManager::new(&db_path, DB_POOL_SIZE)?;
            db.run_migrations()?;
            Ok(db)
        })
        .await
        .map_err(|e| LaunchBotError::Internal(format!("database setup task failed: {e}")))??;
        let db = Arc::new(db);

        let credentials =
            Arc::new(SqliteCredentialStore::new(db.clone(), config.storage.credential_path.clone()));
        let events = Arc::new(SqliteEventRepository::new(db.clone()));

        let flow = Arc::new(OAuthFlowController::new(
            Arc::new(oauth),
            credentials.clone(),
            Arc::new(provider),
        ));
        let announcements =
            Arc::new(AnnouncementService::new(flow.clone(), events.clone(), settings));

        tracing::info!(
            db_path = %db.path().display(),
            credential_path = %config.storage.credential_path,
            environment = ?config.environment,
            "application context ready"
        );

        Ok(Self {
            config,
            db,
            credentials,
            events,
            flow,
            announcements,
            scheduler: Mutex::new(None),
        })
    }

    /// Start the cron triggers when `schedule.enabled` is set.
    ///
    /// Returns whether a scheduler is running afterwards.
    pub async fn start_scheduler(&self) -> Result<bool> {
        if !self.config.schedule.enabled {
            tracing::info!("schedule disabled; announcements run only on HTTP trigger");
            return Ok(false);
        }

        let mut slot = self.scheduler.lock().await;
        if slot.is_some() {
            return Ok(true);
        }

        let mut scheduler = AnnouncementScheduler::with_config(
            AnnouncementSchedulerConfig::from(&self.config.schedule),
            self.announcements.clone(),
        );
        scheduler.start().await?;
        *slot = Some(scheduler);
        Ok(true)
    }

    pub async fn scheduler_running(&self) -> bool {
        self.scheduler.lock().await.as_ref().is_some_and(AnnouncementScheduler::is_running)
    }

    /// Stop the scheduler if one was started.
    pub async fn shutdown(&self) -> Result<()> {
        if let Some(mut scheduler) = self.scheduler.lock().await.take() {
            scheduler.stop().await?;
        }
        tracing::info!("application context shut down");
        Ok(())
    }

    /// Check the database and report the credential phase.
    pub async fn health_check(&self) -> HealthStatus {
        let status = HealthStatus::new().add_component(self.check_database_health().await);

        let credentials = match self.credentials.get().await {
            Ok(record) => {
                let phase = record.map_or(AuthPhase::Unauthenticated, |r| r.phase());
                let component = ComponentHealth::healthy("credentials");
                match phase {
                    AuthPhase::Authenticated | AuthPhase::Refreshed => component,
                    other => ComponentHealth::unhealthy(
                        "credentials",
                        format!("phase {other:?}; run /auth"),
                    ),
                }
            }
            Err(e) => ComponentHealth::unhealthy("credentials", e.to_string()),
        }
        .informational();

        let scheduler = if self.scheduler_running().await {
            ComponentHealth::healthy("scheduler")
        } else {
            ComponentHealth::healthy("scheduler").with_message("not running")
        };

        status.add_component(credentials).add_component(scheduler).finish()
    }

    async fn check_database_health(&self) -> ComponentHealth {
        let db = self.db.clone();
        match tokio::task::spawn_blocking(move || db.health_check()).await {
            Ok(Ok(())) => ComponentHealth::healthy("database"),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "database health check failed");
                ComponentHealth::unhealthy("database", format!("query failed: {e}"))
            }
            Err(e) => {
                tracing::error!(error = %e, "database health check task panicked");
                ComponentHealth::unhealthy("database", format!("task panic: {e}"))
            }
        }
    }
}
