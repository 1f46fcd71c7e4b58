//! Credential lifecycle: authorization, callback, refresh rotation.

pub mod flow;
pub mod memory;
pub mod ports;

pub use flow::{AuthorizationRedirect, AuthorizedAccount, OAuthFlowController};
pub use memory::InMemoryCredentialStore;
