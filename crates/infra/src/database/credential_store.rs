//! SQLite-backed implementation of the CredentialStore port.
//!
//! The record is one JSON document in `documents`, keyed by the configured
//! credential path. Writes replace the whole document.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use launchbot_core::CredentialStore;
use launchbot_domain::{CredentialRecord, LaunchBotError, Result};
use rusqlite::{params, OptionalExtension};
use tracing::{debug, instrument};

use super::manager::{map_sql_error, DbManager};
use crate::errors::InfraError;

/// Document-store adapter for the credential record.
pub struct SqliteCredentialStore {
    db: Arc<DbManager>,
    path: String,
}

impl SqliteCredentialStore {
    pub fn new(db: Arc<DbManager>, path: impl Into<String>) -> Self {
        Self { db, path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    #[instrument(skip(self), fields(path = %self.path))]
    async fn get(&self) -> Result<Option<CredentialRecord>> {
        let conn = self.db.get_connection()?;
        let body: Option<String> = conn
            .query_row("SELECT body FROM documents WHERE path = ?1", params![self.path], |row| {
                row.get(0)
            })
            .optional()
            .map_err(map_sql_error)?;

        let Some(body) = body else {
            debug!("no credential document stored");
            return Ok(None);
        };

        let record = serde_json::from_str(&body).map_err(InfraError::from)?;
        Ok(Some(record))
    }

    #[instrument(skip(self, record), fields(path = %self.path, phase = ?record.phase()))]
    async fn set(&self, record: &CredentialRecord) -> Result<()> {
        let body = serde_json::to_string(record)
            .map_err(|e| LaunchBotError::Internal(format!("serialize credential record: {e}")))?;

        let conn = self.db.get_connection()?;
        conn.execute(
            "INSERT INTO documents (path, body, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(path) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
            params![self.path, body, Utc::now().timestamp()],
        )
        .map_err(map_sql_error)?;

        debug!("credential document written");
        Ok(())
    }
}
