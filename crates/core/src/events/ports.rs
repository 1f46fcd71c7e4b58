//! Event collection port

use async_trait::async_trait;
use launchbot_domain::{EventQuery, EventRecord, Result};

/// Read access to dated launch events.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Events matching `query`, ordered by date ascending.
    async fn query(&self, query: &EventQuery) -> Result<Vec<EventRecord>>;
}
