use crate::libs::config::Config;
use crate::libs::health::HealthScheduler;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use clap::Args;

// Arguments for the break command.
#[derive(Debug, Args)]
pub struct BreakArgs {
    #[arg(long, short, default_value_t = 5, help = "Break duration in minutes")]
    minutes: u64,
}

// Logs a manually taken break. A running daemon picks the entry up from the
// event log on its next tick and resets its own counters.
pub fn cmd(args: BreakArgs) -> Result<()> {
    let config = Config::read()?;
    let mut scheduler = HealthScheduler::new(&config.health.unwrap_or_default())?;
    scheduler.log_break_taken(args.minutes)?;
    msg_success!(Message::BreakLogged(args.minutes));
    Ok(())
}
