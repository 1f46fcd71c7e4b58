//! # LaunchBot Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite persistence for credentials and events
//! - HTTP client plumbing and the X/Twitter v2 integration
//! - Configuration loading
//! - Cron scheduling of the announcement jobs
//!
//! ## Architecture
//! - Implements traits defined in `launchbot-core`
//! - Depends on `launchbot-domain`, `launchbot-common` and `launchbot-core`
//! - Contains all "impure" code (I/O, network, clocks)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod scheduling;

// Re-export commonly used items
pub use database::{DbManager, SqliteCredentialStore, SqliteEventRepository};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::twitter::{TwitterApiClient, TWITTER_API_URL};
pub use scheduling::{AnnouncementScheduler, AnnouncementSchedulerConfig};
