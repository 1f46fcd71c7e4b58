//! # LaunchBot Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for credentials, events and posting
//! - The OAuth2 flow controller (authorize, callback, refresh rotation)
//! - Event window selection and message composition
//! - The announcement service wiring one invocation end to end
//!
//! ## Architecture Principles
//! - Only depends on `launchbot-common` and `launchbot-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod announce;
pub mod auth;
pub mod compose;
pub mod events;
pub mod posting;

// Re-export specific items to avoid ambiguity
pub use announce::{AnnouncementService, AnnouncementSettings};
pub use auth::ports::CredentialStore;
pub use auth::{
    AuthorizationRedirect, AuthorizedAccount, InMemoryCredentialStore, OAuthFlowController,
};
pub use compose::{AlertComposer, AlertPlan, Countdown, DigestComposer, Headline};
pub use events::ports::EventRepository;
pub use events::{EventWindowQuery, InMemoryEventRepository};
pub use posting::ports::PostingProvider;
pub use posting::{AuthenticatedClient, PostDispatcher};
