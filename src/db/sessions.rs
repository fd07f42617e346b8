//! Work session storage and screen-time aggregation.
//!
//! A work session is a maximal contiguous interval of active classification.
//! At most one session is open (`end IS NULL`) at any instant; the monitor
//! enforces the transition logic, this module enforces it in queries.

use crate::db::db::Db;
use crate::libs::formatter::{format_duration, FormattedEvent};
use anyhow::Result;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};

const INSERT_SESSION: &str = "INSERT INTO sessions (start) VALUES (?1)";
const CLOSE_SESSION: &str = "UPDATE sessions SET end = ?1, active_seconds = ?2 WHERE id = ?3";
const SELECT_OPEN: &str = "SELECT id, start, end, active_seconds FROM sessions WHERE end IS NULL ORDER BY id DESC LIMIT 1";
const SELECT_DAY: &str = "SELECT id, start, end, active_seconds FROM sessions WHERE date(start) = date(?1) ORDER BY start";
const SELECT_ALL: &str = "SELECT id, start, end, active_seconds FROM sessions ORDER BY start";
const SUM_DAY_CLOSED: &str = "SELECT COALESCE(SUM(active_seconds), 0) FROM sessions WHERE date(start) = date(?1) AND end IS NOT NULL";

/// A contiguous interval of active work.
#[derive(Debug, Clone)]
pub struct WorkSession {
    pub id: i64,
    pub start: NaiveDateTime,
    /// `None` while the session is still open.
    pub end: Option<NaiveDateTime>,
    pub active_seconds: i64,
}

/// A trait for formatting a collection of `WorkSession` instances.
pub trait SessionGroup {
    /// Formats a vector of `WorkSession` into `FormattedEvent`s for display.
    fn format(&self) -> Vec<FormattedEvent>;
}

impl SessionGroup for Vec<WorkSession> {
    fn format(&self) -> Vec<FormattedEvent> {
        self.iter()
            .enumerate()
            .map(|(index, s)| FormattedEvent {
                id: (index + 1) as i32,
                start: s.start.format("%H:%M").to_string(),
                end: s.end.map_or_else(|| "-".to_string(), |e| e.format("%H:%M").to_string()),
                duration: if s.end.is_some() {
                    format_duration(&Duration::seconds(s.active_seconds))
                } else {
                    "--:--".to_string()
                },
            })
            .collect()
    }
}

pub struct Sessions {
    conn: Connection,
}

impl Sessions {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Sessions { conn: db.conn })
    }

    /// Opens a new session starting at the given time and returns its id.
    pub fn open(&self, start: NaiveDateTime) -> Result<i64> {
        self.conn.execute(INSERT_SESSION, params![start])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Closes a session, deriving its duration from the wall-clock bounds.
    ///
    /// An end before the recorded start (possible when a session is opened
    /// and closed within one sampling tick) clamps the duration to zero.
    pub fn close(&self, id: i64, end: NaiveDateTime) -> Result<()> {
        let start: NaiveDateTime = self
            .conn
            .query_row("SELECT start FROM sessions WHERE id = ?1", params![id], |row| row.get(0))?;
        let active_seconds = (end - start).num_seconds().max(0);
        self.conn.execute(CLOSE_SESSION, params![end.max(start), active_seconds, id])?;
        Ok(())
    }

    /// Returns the currently open session, if any.
    pub fn fetch_open(&self) -> Result<Option<WorkSession>> {
        let session = self.conn.query_row(SELECT_OPEN, [], Self::map_row).optional()?;
        Ok(session)
    }

    pub fn fetch_day(&self, date: NaiveDate) -> Result<Vec<WorkSession>> {
        let mut stmt = self.conn.prepare(SELECT_DAY)?;
        let session_iter = stmt.query_map(params![date], Self::map_row)?;

        let mut sessions = Vec::new();
        for session in session_iter {
            sessions.push(session?);
        }
        Ok(sessions)
    }

    pub fn fetch_all(&self) -> Result<Vec<WorkSession>> {
        let mut stmt = self.conn.prepare(SELECT_ALL)?;
        let session_iter = stmt.query_map([], Self::map_row)?;

        let mut sessions = Vec::new();
        for session in session_iter {
            sessions.push(session?);
        }
        Ok(sessions)
    }

    /// Total active seconds for a day, counting the open session up to `now`.
    pub fn total_screen_time(&self, date: NaiveDate, now: NaiveDateTime) -> Result<i64> {
        let closed: i64 = self.conn.query_row(SUM_DAY_CLOSED, params![date], |row| row.get(0))?;
        let open = self
            .fetch_open()?
            .filter(|s| s.start.date() == date)
            .map(|s| (now - s.start).num_seconds().max(0))
            .unwrap_or(0);
        Ok(closed + open)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<WorkSession> {
        Ok(WorkSession {
            id: row.get(0)?,
            start: row.get(1)?,
            end: row.get(2)?,
            active_seconds: row.get(3)?,
        })
    }
}
