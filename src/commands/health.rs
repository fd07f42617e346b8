use crate::db::health_events::HealthEvents;
use crate::libs::config::Config;
use crate::libs::health::HealthScheduler;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::msg_print;
use anyhow::Result;
use chrono::Local;

/// Number of recent events shown below the summary table.
const RECENT_EVENTS: usize = 5;

// Runs the health command: today's reminder summary plus recent events.
pub fn cmd() -> Result<()> {
    let config = Config::read()?;
    let scheduler = HealthScheduler::new(&config.health.unwrap_or_default())?;

    msg_print!(Message::HealthSummaryHeader, true);
    View::health_summary(&scheduler.today_summary()?)?;

    let events = HealthEvents::new()?.fetch_day(Local::now().date_naive())?;
    if events.is_empty() {
        msg_print!(Message::NoHealthEventsToday);
    } else {
        msg_print!(Message::HealthRecentEventsHeader, true);
        View::health_events(&events.into_iter().take(RECENT_EVENTS).collect())?;
    }

    Ok(())
}
