//! SQLite-backed implementation of the EventRepository port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use launchbot_core::EventRepository;
use launchbot_domain::{EventQuery, EventRecord, LaunchBotError, Result};
use rusqlite::{params, params_from_iter};
use tracing::{debug, instrument};

use super::manager::{map_sql_error, DbManager};

/// Event collection stored in the `events` table.
pub struct SqliteEventRepository {
    db: Arc<DbManager>,
}

impl SqliteEventRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Insert one event, returning its row id.
    #[instrument(skip(self, event), fields(team = %event.team))]
    pub fn insert_event(&self, event: &EventRecord) -> Result<i64> {
        let conn = self.db.get_connection()?;
        conn.execute(
            "INSERT INTO events (team, date_ts, link, twitter_handle) VALUES (?1, ?2, ?3, ?4)",
            params![event.team, event.date.timestamp_millis(), event.link, event.twitter_handle],
        )
        .map_err(map_sql_error)?;
        Ok(conn.last_insert_rowid())
    }

    fn run_query(&self, query: &EventQuery) -> Result<Vec<EventRecord>> {
        let mut sql =
            String::from("SELECT team, date_ts, link, twitter_handle FROM events WHERE 1 = 1");
        let mut values: Vec<i64> = Vec::new();

        if let Some(after) = query.after {
            sql.push_str(" AND date_ts > ?");
            values.push(after.timestamp_millis());
        }
        if let Some(before) = query.before {
            sql.push_str(" AND date_ts < ?");
            values.push(before.timestamp_millis());
        }
        sql.push_str(" ORDER BY date_ts ASC, id ASC");
        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            values.push(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let conn = self.db.get_connection()?;
        let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            })
            .map_err(map_sql_error)?;

        let mut events = Vec::new();
        for row in rows {
            let (team, date_ts, link, twitter_handle) = row.map_err(map_sql_error)?;
            let date = DateTime::from_timestamp_millis(date_ts).ok_or_else(|| {
                LaunchBotError::Query(format!("event '{team}' has out-of-range date {date_ts}"))
            })?;
            events.push(EventRecord { team, date, link, twitter_handle });
        }
        Ok(events)
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepository {
    #[instrument(skip(self))]
    async fn query(&self, query: &EventQuery) -> Result<Vec<EventRecord>> {
        let events = self.run_query(query).map_err(|err| match err {
            LaunchBotError::Query(_) => err,
            other => LaunchBotError::Query(other.to_string()),
        })?;
        debug!(count = events.len(), "events loaded");
        Ok(events)
    }
}
