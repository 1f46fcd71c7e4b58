//! Credential persistence port

use async_trait::async_trait;
use launchbot_domain::{CredentialRecord, Result};

/// Single-document credential store addressed by one configured path.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the record, `None` when nothing has been written yet.
    async fn get(&self) -> Result<Option<CredentialRecord>>;

    /// Overwrite the record. Fields absent from `record` are dropped.
    async fn set(&self, record: &CredentialRecord) -> Result<()>;
}
