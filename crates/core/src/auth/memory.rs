//! In-memory credential store for tests and dry runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use launchbot_domain::{CredentialRecord, Result};
use parking_lot::Mutex;

use super::ports::CredentialStore;

/// Process-local [`CredentialStore`] that counts writes.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    record: Mutex<Option<CredentialRecord>>,
    writes: AtomicUsize,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a record. Seeding does not count as a write.
    pub fn with_record(record: CredentialRecord) -> Self {
        Self { record: Mutex::new(Some(record)), writes: AtomicUsize::new(0) }
    }

    /// Number of `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Current record without going through the port.
    pub fn snapshot(&self) -> Option<CredentialRecord> {
        self.record.lock().clone()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get(&self) -> Result<Option<CredentialRecord>> {
        Ok(self.record.lock().clone())
    }

    async fn set(&self, record: &CredentialRecord) -> Result<()> {
        *self.record.lock() = Some(record.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
