//! Scheduling infrastructure for automated announcements
//!
//! The announcement scheduler follows the runtime rules used across this
//! crate:
//! - Explicit lifecycle management (start/stop)
//! - Each invocation on its own task, never dropped mid-run
//! - Cancellation token support
//! - Timeouts on scheduler start/stop and on waiting for invocations

pub mod announcement_scheduler;
pub mod error;

pub use announcement_scheduler::{
    AnnouncementJob, AnnouncementKind, AnnouncementScheduler, AnnouncementSchedulerConfig,
};
pub use error::{SchedulerError, SchedulerResult};
