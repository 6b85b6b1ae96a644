//! SQLite interaction store

use super::{InteractionRecord, InteractionStore};
use crate::error::{AssistantError, AssistantResult};
use crate::nlp::{Intent, Response};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;
use std::path::PathBuf;

/// SQLite-backed interaction log
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    pub fn new(db_path: PathBuf) -> AssistantResult<Self> {
        let store = Self { db_path };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> AssistantResult<()> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS interactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                intent TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                response TEXT NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_interactions_timestamp ON interactions (timestamp)",
            [],
        )?;
        Ok(())
    }

    pub fn count(&self) -> AssistantResult<usize> {
        let conn = Connection::open(&self.db_path)?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM interactions", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

impl InteractionStore for SqliteStore {
    fn save(&self, record: &InteractionRecord) -> AssistantResult<()> {
        let conn = Connection::open(&self.db_path)?;
        // Fixed-width UTC timestamps sort lexically in time order
        let timestamp = record.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true);
        let response = serde_json::to_string(&record.response)?;
        conn.execute(
            "INSERT INTO interactions (text, intent, timestamp, response) VALUES (?, ?, ?, ?)",
            (
                record.text.as_str(),
                record.intent.label(),
                timestamp,
                response,
            ),
        )?;
        Ok(())
    }

    fn recent(&self, limit: usize) -> AssistantResult<Vec<InteractionRecord>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(
            "SELECT text, intent, timestamp, response
             FROM interactions
             ORDER BY timestamp DESC, id DESC
             LIMIT ?",
        )?;
        let rows = stmt.query_map([limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut results = Vec::new();
        for row in rows {
            let (text, intent, timestamp, response) = row?;
            let timestamp = DateTime::parse_from_rfc3339(&timestamp)
                .map_err(|e| AssistantError::Store(format!("bad timestamp '{}': {}", timestamp, e)))?
                .with_timezone(&Utc);
            let response: Response = serde_json::from_str(&response)?;
            results.push(InteractionRecord {
                text,
                intent: Intent::from_label(&intent),
                timestamp,
                response,
            });
        }
        Ok(results)
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
