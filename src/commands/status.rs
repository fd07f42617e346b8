use crate::db::activities::Activities;
use crate::db::health_events::HealthEvents;
use crate::db::sessions::{SessionGroup, Sessions};
use crate::db::tasks::Tasks;
use crate::libs::daemon;
use crate::libs::formatter::format_duration;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::msg_print;
use anyhow::Result;
use chrono::{Duration, Local};

// Runs the status command: daemon state plus today's summary.
pub fn cmd() -> Result<()> {
    let now = Local::now().naive_local();
    let today = Local::now().date_naive();

    msg_print!(Message::StatusHeader, true);

    match daemon::running_pid() {
        Some(pid) => msg_print!(Message::DaemonRunningWithPid(pid)),
        None => msg_print!(Message::DaemonDown),
    }

    let sessions = Sessions::new()?;
    let total_seconds = sessions.total_screen_time(today, now)?;
    msg_print!(Message::ScreenTimeToday(format_duration(&Duration::seconds(total_seconds))));

    let today_sessions = sessions.fetch_day(today)?;
    if !today_sessions.is_empty() {
        View::sessions(&today_sessions.format())?;
    }

    let samples = Activities::new()?.fetch_recent(3)?;
    if samples.is_empty() {
        msg_print!(Message::NoActivityRecorded);
    } else {
        msg_print!(Message::RecentActivityHeader);
        for sample in samples {
            println!("  {} - {}", sample.timestamp.format("%H:%M:%S"), sample.activity_type);
        }
    }

    let pending = Tasks::new()?.fetch_pending()?;
    msg_print!(Message::PendingTasksCount(pending.len()));

    match HealthEvents::new()?.last_break_time()? {
        Some(timestamp) => msg_print!(Message::LastBreakMinutesAgo((now - timestamp).num_minutes())),
        None => msg_print!(Message::NoBreaksToday),
    }

    Ok(())
}
