//! Scheduler error types

use std::time::Duration;

use launchbot_domain::LaunchBotError;
use thiserror::Error;
use tokio::time::error::Elapsed;
use tokio_cron_scheduler::JobSchedulerError;

use crate::errors::InfraError;

/// Scheduler-specific errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Scheduler is already running
    #[error("Scheduler already running")]
    AlreadyRunning,

    /// Scheduler is not running
    #[error("Scheduler not running")]
    NotRunning,

    /// Failed to create scheduler
    #[error("Failed to create scheduler: {source}")]
    CreationFailed { source: JobSchedulerError },

    /// Failed to start scheduler
    #[error("Failed to start scheduler: {source}")]
    StartFailed { source: JobSchedulerError },

    /// Failed to stop scheduler
    #[error("Failed to stop scheduler: {source}")]
    StopFailed { source: JobSchedulerError },

    /// Failed to register job (bad cron expression, ...)
    #[error("Failed to register job: {source}")]
    JobRegistrationFailed { source: JobSchedulerError },

    /// Operation timed out
    #[error("Operation timed out after {duration:?}")]
    Timeout { duration: Duration, source: Elapsed },
}

impl From<SchedulerError> for InfraError {
    fn from(err: SchedulerError) -> Self {
        let launch_err = match err {
            SchedulerError::AlreadyRunning | SchedulerError::NotRunning => {
                LaunchBotError::InvalidInput(err.to_string())
            }
            SchedulerError::JobRegistrationFailed { .. } => LaunchBotError::Config(err.to_string()),
            _ => LaunchBotError::Internal(err.to_string()),
        };
        InfraError(launch_err)
    }
}

impl From<SchedulerError> for LaunchBotError {
    fn from(err: SchedulerError) -> Self {
        InfraError::from(err).into()
    }
}

/// Convenience type alias for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;
