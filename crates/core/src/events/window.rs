//! Time-window selection over the event collection.
//!
//! Three views are derived from one reference instant:
//! - upcoming: the next few events after now
//! - today: events between now and the next local midnight
//! - imminent: the first of today's events

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use launchbot_domain::{EventQuery, EventRecord, LaunchBotError, Result, UPCOMING_EVENT_LIMIT};
use tracing::debug;

use super::ports::EventRepository;

/// First instant of the next calendar day in `tz`, as UTC.
pub fn next_local_midnight(now: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let fallback = now + Duration::days(1);
    let Some(midnight) = now
        .with_timezone(&tz)
        .date_naive()
        .succ_opt()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
    else {
        return fallback;
    };

    // A DST gap can swallow midnight; the first valid instant after it wins.
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map_or(fallback, |local| local.with_timezone(&Utc))
}

/// Day-of-month difference between the event and `now` in `tz`.
///
/// Deliberately naive: month boundaries are not accounted for, so an event on
/// the 3rd seen from the 30th yields -27.
pub fn days_until(event: &EventRecord, now: DateTime<Utc>, tz: Tz) -> i64 {
    let event_day = i64::from(event.date.with_timezone(&tz).day());
    let today = i64::from(now.with_timezone(&tz).day());
    event_day - today
}

/// Window queries bound to an [`EventRepository`].
#[derive(Clone)]
pub struct EventWindowQuery {
    repository: Arc<dyn EventRepository>,
}

impl EventWindowQuery {
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    /// Up to four events strictly after `now`.
    pub async fn upcoming(&self, now: DateTime<Utc>) -> Result<Vec<EventRecord>> {
        self.run(EventQuery::after(now).limit(UPCOMING_EVENT_LIMIT)).await
    }

    /// All events strictly between `now` and `tomorrow`.
    pub async fn today(
        &self,
        now: DateTime<Utc>,
        tomorrow: DateTime<Utc>,
    ) -> Result<Vec<EventRecord>> {
        self.run(EventQuery::after(now).before(tomorrow)).await
    }

    /// The earliest event strictly between `now` and `tomorrow`.
    pub async fn imminent(
        &self,
        now: DateTime<Utc>,
        tomorrow: DateTime<Utc>,
    ) -> Result<Option<EventRecord>> {
        let events = self.run(EventQuery::after(now).before(tomorrow).limit(1)).await?;
        Ok(events.into_iter().next())
    }

    async fn run(&self, query: EventQuery) -> Result<Vec<EventRecord>> {
        let events = self.repository.query(&query).await.map_err(|err| match err {
            LaunchBotError::Query(_) => err,
            other => LaunchBotError::Query(other.to_string()),
        })?;
        debug!(count = events.len(), ?query, "event window query");
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::InMemoryEventRepository;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn repo(events: Vec<EventRecord>) -> EventWindowQuery {
        EventWindowQuery::new(Arc::new(InMemoryEventRepository::new(events)))
    }

    #[test]
    fn midnight_in_gmt() {
        let now = at(2025, 2, 10, 9, 30);
        assert_eq!(next_local_midnight(now, chrono_tz::Etc::GMT), at(2025, 2, 11, 0, 0));
    }

    #[test]
    fn midnight_respects_offset() {
        // 23:30 UTC is already the 11th in Berlin (UTC+1)
        let now = at(2025, 2, 10, 23, 30);
        assert_eq!(next_local_midnight(now, chrono_tz::Europe::Berlin), at(2025, 2, 11, 23, 0));
    }

    #[test]
    fn days_until_wraps_naively_across_months() {
        let now = at(2025, 1, 30, 12, 0);
        let event = EventRecord::new("Ferrari", at(2025, 2, 3, 12, 0));
        assert_eq!(days_until(&event, now, chrono_tz::Etc::GMT), -27);
    }

    #[test]
    fn days_until_same_month() {
        let now = at(2025, 2, 10, 8, 0);
        let event = EventRecord::new("Ferrari", at(2025, 2, 13, 18, 0));
        assert_eq!(days_until(&event, now, chrono_tz::Etc::GMT), 3);
    }

    #[tokio::test]
    async fn upcoming_is_capped_and_ordered() {
        let now = at(2025, 2, 1, 0, 0);
        let events = (1..=6)
            .rev()
            .map(|d| EventRecord::new(format!("Team {d}"), at(2025, 2, d, 12, 0)))
            .collect();
        let upcoming = repo(events).upcoming(now).await.unwrap();

        assert_eq!(upcoming.len(), 4);
        assert_eq!(upcoming[0].team, "Team 1");
        assert!(upcoming.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[tokio::test]
    async fn bounds_are_strict() {
        let now = at(2025, 2, 10, 9, 0);
        let tomorrow = at(2025, 2, 11, 0, 0);
        let window = repo(vec![
            EventRecord::new("AtNow", now),
            EventRecord::new("Inside", at(2025, 2, 10, 15, 0)),
            EventRecord::new("AtMidnight", tomorrow),
        ]);

        let today = window.today(now, tomorrow).await.unwrap();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].team, "Inside");

        let imminent = window.imminent(now, tomorrow).await.unwrap();
        assert_eq!(imminent.map(|e| e.team).as_deref(), Some("Inside"));
    }

    #[tokio::test]
    async fn imminent_none_when_day_is_empty() {
        let now = at(2025, 2, 10, 9, 0);
        let window = repo(vec![EventRecord::new("Later", at(2025, 2, 12, 9, 0))]);
        assert!(window.imminent(now, at(2025, 2, 11, 0, 0)).await.unwrap().is_none());
    }
}
