use crate::api::ollama::Ollama;
use crate::api::prompts::PromptTemplates;
use crate::db::health_events::HealthEvents;
use crate::db::sessions::Sessions;
use crate::db::tasks::Tasks;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::{msg_error, msg_print};
use anyhow::Result;
use chrono::Local;

/// Minimum minutes of screen time before a health suggestion is worthwhile.
const MIN_WORK_MINUTES: i64 = 30;

/// Token limit for a single suggestion.
const MAX_TOKENS: u32 = 150;

// Runs the suggest command: AI-generated health and task suggestions based
// on today's activity.
pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let ollama = Ollama::new(&config.ollama.unwrap_or_default());

    if !ollama.test_connection().await {
        msg_error!(Message::OllamaUnreachable(ollama.api_url().to_string()));
        return Ok(());
    }

    let now = Local::now().naive_local();
    let today = Local::now().date_naive();

    let work_minutes = Sessions::new()?.total_screen_time(today, now)? / 60;
    let since_break_minutes = HealthEvents::new()?
        .last_break_time()?
        .map(|t| (now - t).num_minutes())
        .unwrap_or(work_minutes);

    if work_minutes >= MIN_WORK_MINUTES {
        msg_print!(Message::SuggestHealthHeader, true);
        let prompt = PromptTemplates::health_reminder(work_minutes, since_break_minutes, &now);
        println!("{}", ollama.generate(&prompt, MAX_TOKENS).await?);
    } else {
        msg_print!(Message::SuggestNotEnoughActivity);
    }

    let pending = Tasks::new()?.fetch_pending()?;
    if !pending.is_empty() {
        msg_print!(Message::SuggestTasksHeader, true);
        let prompt = PromptTemplates::task_prioritization(&pending, &now);
        println!("{}", ollama.generate(&prompt, MAX_TOKENS).await?);
    }

    Ok(())
}
