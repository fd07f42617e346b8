use crate::db::health_events::HealthEvent;
use crate::db::tasks::Task;
use crate::libs::formatter::FormattedEvent;
use crate::libs::health::HealthSummary;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn tasks(tasks: &Vec<Task>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "PRIORITY", "STATUS", "DUE DATE"]);
        for task in tasks {
            table.add_row(row![
                task.id.unwrap_or(0),
                task.title,
                task.priority,
                task.status,
                task.due_date.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string())
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn sessions(sessions: &Vec<FormattedEvent>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "START", "END", "DURATION"]);
        for session in sessions {
            table.add_row(row![session.id, session.start, session.end, session.duration]);
        }
        table.printstd();

        Ok(())
    }

    pub fn health_summary(summary: &HealthSummary) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["🧘 Breaks taken", summary.breaks_taken]);
        table.add_row(row!["⏰ Break reminders", summary.break_reminders]);
        table.add_row(row!["💺 Posture checks", summary.posture_checks]);
        table.add_row(row!["👀 Eye care reminders", summary.eye_care_reminders]);
        table.add_row(row!["💧 Hydration reminders", summary.hydration_reminders]);
        table.add_row(row!["📢 Total reminders", summary.total_reminders]);
        table.printstd();

        Ok(())
    }

    pub fn health_events(events: &Vec<HealthEvent>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["TIME", "EVENT"]);
        for event in events {
            table.add_row(row![
                event.timestamp.format("%H:%M").to_string(),
                event.event_type.replace('_', " ")
            ]);
        }
        table.printstd();

        Ok(())
    }
}
