//! Cron triggers for the announcement jobs.
//!
//! Two jobs are registered on one `JobScheduler`: the daily digest and the
//! imminent alert. Each tick spawns one invocation from scratch. The job
//! timeout bounds how long the tick waits for it; an invocation that outlives
//! it keeps running to completion so a refreshed token pair is always
//! persisted. Failures are logged and never retried, and overlapping ticks
//! are not coordinated.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use launchbot_core::AnnouncementService;
//! use launchbot_infra::scheduling::{
//!     AnnouncementScheduler, AnnouncementSchedulerConfig, SchedulerResult,
//! };
//!
//! # async fn example(service: Arc<AnnouncementService>) -> SchedulerResult<()> {
//! let mut scheduler =
//!     AnnouncementScheduler::with_config(AnnouncementSchedulerConfig::default(), service);
//!
//! scheduler.start().await?;
//! // ... application runs ...
//! scheduler.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use launchbot_core::AnnouncementService;
use launchbot_domain::{AnnouncementOutcome, Result, ScheduleConfig};
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::scheduling::error::{SchedulerError, SchedulerResult};

/// Which announcement a tick triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementKind {
    DailyDigest,
    ImminentAlert,
}

impl fmt::Display for AnnouncementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DailyDigest => f.write_str("daily_digest"),
            Self::ImminentAlert => f.write_str("imminent_alert"),
        }
    }
}

/// One announcement invocation.
#[async_trait]
pub trait AnnouncementJob: Send + Sync {
    async fn run(&self, kind: AnnouncementKind, now: DateTime<Utc>)
        -> Result<AnnouncementOutcome>;
}

#[async_trait]
impl AnnouncementJob for AnnouncementService {
    async fn run(
        &self,
        kind: AnnouncementKind,
        now: DateTime<Utc>,
    ) -> Result<AnnouncementOutcome> {
        match kind {
            AnnouncementKind::DailyDigest => self.daily_digest(now).await,
            AnnouncementKind::ImminentAlert => self.imminent_alert(now).await,
        }
    }
}

/// Configuration for the announcement scheduler.
#[derive(Debug, Clone)]
pub struct AnnouncementSchedulerConfig {
    /// Cron expression for the daily digest.
    pub daily_cron: String,
    /// Cron expression for the imminent alert check.
    pub alert_cron: String,
    /// How long a tick waits on its invocation before logging a timeout.
    pub job_timeout: Duration,
    /// Timeout for starting the underlying scheduler.
    pub start_timeout: Duration,
    /// Timeout for stopping the scheduler.
    pub stop_timeout: Duration,
}

impl Default for AnnouncementSchedulerConfig {
    fn default() -> Self {
        Self::from(&ScheduleConfig::default())
    }
}

impl From<&ScheduleConfig> for AnnouncementSchedulerConfig {
    fn from(schedule: &ScheduleConfig) -> Self {
        Self {
            daily_cron: schedule.daily_cron.clone(),
            alert_cron: schedule.alert_cron.clone(),
            job_timeout: Duration::from_secs(schedule.job_timeout_secs.max(1)),
            start_timeout: Duration::from_secs(5),
            stop_timeout: Duration::from_secs(5),
        }
    }
}

/// Announcement scheduler with explicit lifecycle management.
pub struct AnnouncementScheduler {
    scheduler: Option<JobScheduler>,
    config: AnnouncementSchedulerConfig,
    cancellation: CancellationToken,
    job: Arc<dyn AnnouncementJob>,
}

impl AnnouncementScheduler {
    pub fn with_config(config: AnnouncementSchedulerConfig, job: Arc<dyn AnnouncementJob>) -> Self {
        Self {
            scheduler: None,
            config,
            cancellation: CancellationToken::new(),
            job,
        }
    }

    /// Register both jobs and start ticking.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        self.cancellation = CancellationToken::new();

        let scheduler_instance = self.build_scheduler().await?;
        let start_timeout = self.config.start_timeout;

        let start_result = tokio::time::timeout(start_timeout, scheduler_instance.start())
            .await
            .map_err(|source| SchedulerError::Timeout { duration: start_timeout, source })?;

        start_result.map_err(|source| SchedulerError::StartFailed { source })?;

        self.scheduler = Some(scheduler_instance);
        info!(
            daily_cron = %self.config.daily_cron,
            alert_cron = %self.config.alert_cron,
            "Announcement scheduler started"
        );
        Ok(())
    }

    /// Stop ticking. Invocations already spawned run to completion.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        let Some(mut scheduler) = self.scheduler.take() else {
            return Err(SchedulerError::NotRunning);
        };

        self.cancellation.cancel();

        let stop_timeout = self.config.stop_timeout;
        let stop_result =
            tokio::time::timeout(stop_timeout, async move { scheduler.shutdown().await })
                .await
                .map_err(|source| SchedulerError::Timeout { duration: stop_timeout, source })?;

        stop_result.map_err(|source| SchedulerError::StopFailed { source })?;

        info!("Announcement scheduler stopped");
        Ok(())
    }

    /// Returns true when a scheduler instance is active.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_some()
    }

    async fn build_scheduler(&self) -> SchedulerResult<JobScheduler> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|source| SchedulerError::CreationFailed { source })?;

        for (kind, cron) in [
            (AnnouncementKind::DailyDigest, &self.config.daily_cron),
            (AnnouncementKind::ImminentAlert, &self.config.alert_cron),
        ] {
            let job = self.register(kind, cron)?;
            let job_id = scheduler
                .add(job)
                .await
                .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;
            debug!(%kind, cron = %cron, job_id = %job_id, "Registered announcement job");
        }

        Ok(scheduler)
    }

    fn register(&self, kind: AnnouncementKind, cron: &str) -> SchedulerResult<Job> {
        let job = self.job.clone();
        let cancel = self.cancellation.clone();
        let job_timeout = self.config.job_timeout;

        Job::new_async(cron, move |_id, _lock| {
            let job = job.clone();
            let cancel = cancel.clone();

            Box::pin(async move {
                if cancel.is_cancelled() {
                    return;
                }
                let started = Instant::now();
                let invocation = tokio::spawn(async move { job.run(kind, Utc::now()).await });

                match tokio::time::timeout(job_timeout, invocation).await {
                    Ok(Ok(Ok(AnnouncementOutcome::Posted(receipt)))) => info!(
                        %kind,
                        post_id = receipt.id.as_deref().unwrap_or("unknown"),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Scheduled announcement posted"
                    ),
                    Ok(Ok(Ok(AnnouncementOutcome::Skipped(reason)))) => {
                        debug!(%kind, %reason, "Scheduled announcement skipped")
                    }
                    Ok(Ok(Err(err))) => {
                        error!(%kind, error = %err, kind_label = err.label(), "Scheduled announcement failed")
                    }
                    Ok(Err(join_err)) => {
                        error!(%kind, error = %join_err, "Scheduled announcement task aborted")
                    }
                    Err(_) => {
                        warn!(
                            %kind,
                            timeout_secs = job_timeout.as_secs(),
                            "Scheduled announcement still running past its timeout, no longer waiting"
                        )
                    }
                }
            })
        })
        .map_err(|source| SchedulerError::JobRegistrationFailed { source })
    }
}
