//! In-memory event collection

use async_trait::async_trait;
use launchbot_domain::{EventQuery, EventRecord, Result};
use parking_lot::RwLock;

use super::ports::EventRepository;

/// Vector-backed [`EventRepository`] applying the same query semantics as
/// the SQLite adapter.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    events: RwLock<Vec<EventRecord>>,
}

impl InMemoryEventRepository {
    pub fn new(events: Vec<EventRecord>) -> Self {
        Self { events: RwLock::new(events) }
    }

    pub fn insert(&self, event: EventRecord) {
        self.events.write().push(event);
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn query(&self, query: &EventQuery) -> Result<Vec<EventRecord>> {
        let mut matched: Vec<EventRecord> =
            self.events.read().iter().filter(|e| query.matches(e.date)).cloned().collect();
        matched.sort_by_key(|e| e.date);
        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }
}
