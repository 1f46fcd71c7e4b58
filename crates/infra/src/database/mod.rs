//! Database implementations

pub mod credential_store;
pub mod event_repository;
pub mod manager;

pub use credential_store::SqliteCredentialStore;
pub use event_repository::SqliteEventRepository;
pub use manager::{DbManager, SqliteConnection};
