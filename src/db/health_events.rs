//! Append-only storage for health reminder history.
//!
//! Every fired reminder and every manually logged break lands here. The log
//! is the single source of truth for daily summaries and for "time since
//! last break" calculations.

use crate::db::db::Db;
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};

/// Event type recorded when the user explicitly logs a break.
pub const EVENT_BREAK_LOGGED: &str = "break_logged";

const INSERT_EVENT: &str = "INSERT INTO health_events (timestamp, event_type, metadata) VALUES (?1, ?2, ?3)";
const SELECT_DAY: &str = "SELECT id, timestamp, event_type, metadata FROM health_events WHERE date(timestamp) = date(?1) ORDER BY timestamp DESC";
const SELECT_ALL: &str = "SELECT id, timestamp, event_type, metadata FROM health_events ORDER BY timestamp";
const SELECT_LAST_BREAK: &str = "SELECT timestamp FROM health_events WHERE event_type = ?1 ORDER BY timestamp DESC LIMIT 1";

/// One entry in the health event log.
#[derive(Debug, Clone)]
pub struct HealthEvent {
    pub id: Option<i64>,
    pub timestamp: NaiveDateTime,
    pub event_type: String,
    pub metadata: serde_json::Value,
}

pub struct HealthEvents {
    conn: Connection,
}

impl HealthEvents {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(HealthEvents { conn: db.conn })
    }

    pub fn insert(&self, event: &HealthEvent) -> Result<()> {
        self.conn.execute(
            INSERT_EVENT,
            params![event.timestamp, event.event_type, event.metadata.to_string()],
        )?;
        Ok(())
    }

    /// All events recorded on the given day, newest first.
    pub fn fetch_day(&self, date: NaiveDate) -> Result<Vec<HealthEvent>> {
        let mut stmt = self.conn.prepare(SELECT_DAY)?;
        let event_iter = stmt.query_map(params![date], Self::map_row)?;

        let mut events = Vec::new();
        for event in event_iter {
            events.push(event?);
        }
        Ok(events)
    }

    pub fn fetch_all(&self) -> Result<Vec<HealthEvent>> {
        let mut stmt = self.conn.prepare(SELECT_ALL)?;
        let event_iter = stmt.query_map([], Self::map_row)?;

        let mut events = Vec::new();
        for event in event_iter {
            events.push(event?);
        }
        Ok(events)
    }

    /// Timestamp of the most recently logged break, if any.
    pub fn last_break_time(&self) -> Result<Option<NaiveDateTime>> {
        let timestamp = self
            .conn
            .query_row(SELECT_LAST_BREAK, params![EVENT_BREAK_LOGGED], |row| row.get::<_, NaiveDateTime>(0))
            .optional()?;
        Ok(timestamp)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<HealthEvent> {
        let metadata: Option<String> = row.get(3)?;
        Ok(HealthEvent {
            id: Some(row.get(0)?),
            timestamp: row.get(1)?,
            event_type: row.get(2)?,
            metadata: metadata
                .and_then(|m| serde_json::from_str(&m).ok())
                .unwrap_or(serde_json::Value::Null),
        })
    }
}
