use crate::db::tasks::{Task, Tasks};
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_print, msg_success};
use anyhow::Result;
use chrono::Local;
use clap::Args;

// Arguments for the task command.
#[derive(Debug, Args)]
pub struct TaskArgs {
    #[arg(long, short, help = "Task title to create")]
    name: Option<String>,
    #[arg(long, short, default_value = "", help = "Task description")]
    description: String,
    #[arg(long, short, default_value_t = 3, help = "Priority (1-5, 5 = highest)")]
    priority: i32,
    #[arg(long, short, help = "Mark the task with the given ID as complete")]
    complete: Option<i64>,
}

// Creates, completes, or lists tasks depending on the arguments given.
pub fn cmd(args: TaskArgs) -> Result<()> {
    let tasks = Tasks::new()?;

    if let Some(id) = args.complete {
        tasks.complete(id, Local::now().naive_local())?;
        msg_success!(Message::TaskCompleted(id));
        return Ok(());
    }

    if let Some(name) = args.name {
        tasks.insert(&Task {
            id: None,
            title: name.clone(),
            description: args.description,
            priority: args.priority,
            status: "pending".to_string(),
            due_date: None,
            created_at: None,
            completed_at: None,
        })?;
        msg_success!(Message::TaskCreated(name));
        return Ok(());
    }

    let pending = tasks.fetch_pending()?;
    if pending.is_empty() {
        msg_print!(Message::TasksNotFound);
    } else {
        View::tasks(&pending)?;
    }
    Ok(())
}
