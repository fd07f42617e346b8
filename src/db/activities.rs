use crate::db::db::Db;
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

const INSERT_ACTIVITY: &str = "INSERT INTO activities (timestamp, activity_type, details) VALUES (?1, ?2, ?3)";
const SELECT_RECENT: &str = "SELECT id, timestamp, activity_type, details FROM activities ORDER BY timestamp DESC LIMIT ?1";
const SELECT_LAST_TIMESTAMP: &str = "SELECT timestamp FROM activities ORDER BY timestamp DESC LIMIT 1";
const SELECT_ALL: &str = "SELECT id, timestamp, activity_type, details FROM activities ORDER BY timestamp";

/// A single activity observation taken at a sampling tick.
///
/// Samples are immutable once written; `details` carries an opaque JSON map
/// (currently the idle seconds observed at sampling time).
#[derive(Debug, Clone)]
pub struct ActivitySample {
    pub id: Option<i64>,
    pub timestamp: NaiveDateTime,
    pub activity_type: String,
    pub details: serde_json::Value,
}

pub struct Activities {
    conn: Connection,
}

impl Activities {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Activities { conn: db.conn })
    }

    pub fn insert(&self, sample: &ActivitySample) -> Result<()> {
        self.conn.execute(
            INSERT_ACTIVITY,
            params![sample.timestamp, sample.activity_type, sample.details.to_string()],
        )?;
        Ok(())
    }

    pub fn fetch_recent(&self, limit: u32) -> Result<Vec<ActivitySample>> {
        let mut stmt = self.conn.prepare(SELECT_RECENT)?;
        let sample_iter = stmt.query_map(params![limit], Self::map_row)?;

        let mut samples = Vec::new();
        for sample in sample_iter {
            samples.push(sample?);
        }
        Ok(samples)
    }

    /// Timestamp of the newest persisted sample, used to bound the recovery
    /// point for sessions left open by a previous run.
    pub fn last_timestamp(&self) -> Result<Option<NaiveDateTime>> {
        let timestamp = self
            .conn
            .query_row(SELECT_LAST_TIMESTAMP, [], |row| row.get::<_, NaiveDateTime>(0))
            .optional()?;
        Ok(timestamp)
    }

    pub fn fetch_all(&self) -> Result<Vec<ActivitySample>> {
        let mut stmt = self.conn.prepare(SELECT_ALL)?;
        let sample_iter = stmt.query_map([], Self::map_row)?;

        let mut samples = Vec::new();
        for sample in sample_iter {
            samples.push(sample?);
        }
        Ok(samples)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ActivitySample> {
        let details: Option<String> = row.get(3)?;
        Ok(ActivitySample {
            id: Some(row.get(0)?),
            timestamp: row.get(1)?,
            activity_type: row.get(2)?,
            details: details
                .and_then(|d| serde_json::from_str(&d).ok())
                .unwrap_or(serde_json::Value::Null),
        })
    }
}
