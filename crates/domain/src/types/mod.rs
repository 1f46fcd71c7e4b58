//! Domain types and models

pub mod credential;
pub mod event;
pub mod post;

pub use credential::{AuthPhase, CredentialRecord, OAuthSession};
pub use event::{EventQuery, EventRecord};
pub use post::{AnnouncementOutcome, PostReceipt, RecentPost, SkipReason, UserIdentity};
