//! Prompt construction for AI suggestions.
//!
//! Templates are plain string builders; the model sees concrete numbers
//! (work minutes, time since last break, pending tasks) and is asked for a
//! short, actionable reply.

use crate::db::tasks::Task;
use chrono::NaiveDateTime;

pub struct PromptTemplates;

impl PromptTemplates {
    /// Prompt for a personalized break/health suggestion.
    pub fn health_reminder(work_minutes: i64, since_break_minutes: i64, now: &NaiveDateTime) -> String {
        format!(
            "You are a friendly health assistant for a desk worker.\n\
             Current time: {}.\n\
             The user has worked {} minutes today and last took a break {} minutes ago.\n\
             Common concerns: neck pain, eye strain, dry eyes.\n\
             In at most three sentences, suggest one concrete thing to do right now for their health.",
            now.format("%H:%M"),
            work_minutes,
            since_break_minutes
        )
    }

    /// Prompt asking the model to pick the next task to work on.
    pub fn task_prioritization(tasks: &[Task], now: &NaiveDateTime) -> String {
        let mut listing = String::new();
        for task in tasks {
            let due = task
                .due_date
                .map(|d| format!(", due {}", d.format("%Y-%m-%d")))
                .unwrap_or_default();
            listing.push_str(&format!("- {} (priority {}{})\n", task.title, task.priority, due));
        }

        format!(
            "You are a pragmatic productivity assistant.\n\
             Current time: {}.\n\
             Pending tasks:\n{}\
             In at most three sentences, recommend which task to tackle next and why.",
            now.format("%A %H:%M"),
            listing
        )
    }
}
