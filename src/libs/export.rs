//! Data export functionality for external analysis and backup.
//!
//! Dumps everything vigil has collected (tasks, activity samples, work
//! sessions, health events) to JSON or CSV. JSON produces a single
//! pretty-printed document; CSV produces one file per entity since the
//! record shapes differ.

use crate::db::{activities::Activities, health_events::HealthEvents, sessions::Sessions, tasks::Tasks};
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use serde_json::json;
use std::fs::File;
use std::path::PathBuf;

/// Supported export output formats.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values, one file per entity.
    Csv,
    /// Single pretty-printed JSON document.
    Json,
}

/// Exports collected data to the chosen format.
pub struct Exporter {
    format: ExportFormat,
    output: Option<PathBuf>,
}

impl Exporter {
    pub fn new(format: ExportFormat, output: Option<PathBuf>) -> Self {
        Exporter { format, output }
    }

    /// Runs the export and reports the destination path.
    pub fn export(&self) -> Result<()> {
        let base = self.base_path();
        match self.format {
            ExportFormat::Json => self.export_json(&base)?,
            ExportFormat::Csv => self.export_csv(&base)?,
        }
        Ok(())
    }

    fn export_json(&self, base: &PathBuf) -> Result<()> {
        let path = base.with_extension("json");

        let tasks = Tasks::new()?.fetch_all()?;
        let activities = Activities::new()?.fetch_all()?;
        let sessions = Sessions::new()?.fetch_all()?;
        let events = HealthEvents::new()?.fetch_all()?;

        let document = json!({
            "export_date": format_timestamp(&Local::now().naive_local()),
            "version": env!("CARGO_PKG_VERSION"),
            "tasks": tasks.iter().map(|t| json!({
                "id": t.id,
                "title": t.title,
                "description": t.description,
                "priority": t.priority,
                "status": t.status,
                "due_date": t.due_date.as_ref().map(format_timestamp),
                "created_at": t.created_at.as_ref().map(format_timestamp),
                "completed_at": t.completed_at.as_ref().map(format_timestamp),
            })).collect::<Vec<_>>(),
            "activities": activities.iter().map(|a| json!({
                "timestamp": format_timestamp(&a.timestamp),
                "activity_type": a.activity_type,
                "details": a.details,
            })).collect::<Vec<_>>(),
            "sessions": sessions.iter().map(|s| json!({
                "start": format_timestamp(&s.start),
                "end": s.end.as_ref().map(format_timestamp),
                "active_seconds": s.active_seconds,
            })).collect::<Vec<_>>(),
            "health_events": events.iter().map(|e| json!({
                "timestamp": format_timestamp(&e.timestamp),
                "event_type": e.event_type,
                "metadata": e.metadata,
            })).collect::<Vec<_>>(),
        });

        let file = File::create(&path)?;
        serde_json::to_writer_pretty(&file, &document)?;
        msg_success!(Message::ExportCompleted(path.display().to_string()));
        Ok(())
    }

    fn export_csv(&self, base: &PathBuf) -> Result<()> {
        let tasks_path = with_suffix(base, "_tasks.csv");
        let mut writer = csv::Writer::from_path(&tasks_path)?;
        writer.write_record(["id", "title", "description", "priority", "status", "due_date", "created_at", "completed_at"])?;
        for t in Tasks::new()?.fetch_all()? {
            writer.write_record([
                t.id.unwrap_or(0).to_string(),
                t.title,
                t.description,
                t.priority.to_string(),
                t.status,
                t.due_date.as_ref().map(format_timestamp).unwrap_or_default(),
                t.created_at.as_ref().map(format_timestamp).unwrap_or_default(),
                t.completed_at.as_ref().map(format_timestamp).unwrap_or_default(),
            ])?;
        }
        writer.flush()?;

        let activities_path = with_suffix(base, "_activities.csv");
        let mut writer = csv::Writer::from_path(&activities_path)?;
        writer.write_record(["timestamp", "activity_type", "details"])?;
        for a in Activities::new()?.fetch_all()? {
            writer.write_record([format_timestamp(&a.timestamp), a.activity_type, a.details.to_string()])?;
        }
        writer.flush()?;

        let sessions_path = with_suffix(base, "_sessions.csv");
        let mut writer = csv::Writer::from_path(&sessions_path)?;
        writer.write_record(["start", "end", "active_seconds"])?;
        for s in Sessions::new()?.fetch_all()? {
            writer.write_record([
                format_timestamp(&s.start),
                s.end.as_ref().map(format_timestamp).unwrap_or_default(),
                s.active_seconds.to_string(),
            ])?;
        }
        writer.flush()?;

        let events_path = with_suffix(base, "_health_events.csv");
        let mut writer = csv::Writer::from_path(&events_path)?;
        writer.write_record(["timestamp", "event_type", "metadata"])?;
        for e in HealthEvents::new()?.fetch_all()? {
            writer.write_record([format_timestamp(&e.timestamp), e.event_type, e.metadata.to_string()])?;
        }
        writer.flush()?;

        msg_success!(Message::ExportCompleted(format!("{}_*.csv", base.display())));
        Ok(())
    }

    // Base path without extension; a user-supplied output keeps its stem
    fn base_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.with_extension(""),
            None => PathBuf::from(format!("vigil_export_{}", Local::now().format("%Y%m%d"))),
        }
    }
}

fn with_suffix(base: &PathBuf, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{}{}", base.display(), suffix))
}

fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}
