//! Display implementation for vigil application messages.
//!
//! Converts structured `Message` variants into the human-readable text shown
//! on the terminal. All user-facing wording lives here, in one place, so the
//! rest of the code deals only in typed messages.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleMonitor => "Activity monitor configuration".to_string(),
            Message::ConfigModuleHealth => "Health reminder configuration".to_string(),
            Message::ConfigModuleOllama => "Ollama integration configuration".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptSampleInterval => "Sampling interval in seconds".to_string(),
            Message::PromptIdleThreshold => "Inactivity threshold in seconds before the user counts as idle".to_string(),
            Message::PromptBreakThreshold => "Minutes of continuous active work before a break reminder".to_string(),
            Message::PromptPostureThreshold => "Minutes between posture reminders".to_string(),
            Message::PromptEyeCareThreshold => "Minutes between eye care reminders".to_string(),
            Message::PromptHydrationThreshold => "Minutes between hydration reminders".to_string(),
            Message::PromptOllamaApiUrl => "Ollama API URL".to_string(),
            Message::PromptOllamaModel => "Ollama model name".to_string(),

            // === DAEMON MESSAGES ===
            Message::DaemonAlreadyRunning(pid) => {
                format!("vigil daemon is already running (PID: {}). Stop it first with 'vigil stop'", pid)
            }
            Message::DaemonStarted(pid) => format!("vigil daemon started with PID: {}", pid),
            Message::DaemonStopped(pid) => format!("vigil daemon stopped (PID: {})", pid),
            Message::DaemonNotRunning => "vigil daemon is not running".to_string(),
            Message::DaemonStalePidRemoved(pid) => format!("Removed stale PID file for dead process {}", pid),
            Message::DaemonFailedToStop(pid) => format!("Failed to stop daemon process {}", pid),
            Message::DaemonReceivedSigterm => "Received SIGTERM, shutting down...".to_string(),
            Message::DaemonReceivedSigint => "Received SIGINT, shutting down...".to_string(),
            Message::DaemonReceivedCtrlC => "Received Ctrl+C, shutting down...".to_string(),
            Message::DaemonCtrlCListenFailed(e) => format!("Failed to listen for Ctrl+C: {}", e),
            Message::DaemonSignalHandlingNotSupported => "Signal handling is not supported on this platform".to_string(),
            Message::DaemonShuttingDown => "Shutting down services...".to_string(),
            Message::DaemonTickError(e) => format!("Error in daemon loop: {}", e),
            Message::DaemonStatus { state, idle_seconds } => format!("Status: {} | Idle: {}s", state, idle_seconds),
            Message::DaemonModeNotSupported => "Daemon mode is not supported on this platform".to_string(),
            Message::ProcessTerminationNotSupported => "Process termination is not supported on this platform".to_string(),
            Message::InvalidPidFileContent => "PID file does not contain a valid process identifier".to_string(),
            Message::FailedToGetCurrentExecutable => "Failed to determine the current executable path".to_string(),
            Message::FailedToCreateSigtermHandler => "Failed to create SIGTERM handler".to_string(),
            Message::FailedToCreateSigintHandler => "Failed to create SIGINT handler".to_string(),
            Message::FailedToOpenProcess(code) => format!("Failed to open process (error code: {})", code),
            Message::FailedToTerminateProcess(code) => format!("Failed to terminate process (error code: {})", code),

            // === MONITOR MESSAGES ===
            Message::MonitorStarted { sample_interval, idle_threshold } => {
                format!(
                    "Activity monitor started (sampling every {}s, idle after {}s)",
                    sample_interval, idle_threshold
                )
            }
            Message::MonitorStopped => "Activity monitor stopped".to_string(),
            Message::InputHookDegraded(e) => {
                format!("Input hook unavailable ({}), treating the user as always active", e)
            }
            Message::SampleWriteFailed(e) => format!("Dropped activity sample after retry: {}", e),
            Message::StaleSessionClosed => "Closed a work session left open by a previous run".to_string(),

            // === HEALTH MESSAGES ===
            Message::ReminderBreak(minutes) => {
                format!("You've been working for {} minutes. Time to take a break!", minutes)
            }
            Message::ReminderPosture => "Posture check: sit up straight and relax your shoulders".to_string(),
            Message::ReminderEyeCare => "20-20-20: look at something 20 feet away for 20 seconds".to_string(),
            Message::ReminderHydration => "Hydration reminder: drink a glass of water".to_string(),
            Message::NotificationFailed(e) => format!("Failed to deliver notification: {}", e),
            Message::HealthEventWriteFailed(e) => format!("Dropped health event after retry: {}", e),
            Message::BreakLogged(minutes) => format!("Logged {}-minute break", minutes),
            Message::HealthSummaryHeader => "Health Summary - Today".to_string(),
            Message::HealthRecentEventsHeader => "Recent health events".to_string(),
            Message::NoHealthEventsToday => "No health events recorded today".to_string(),

            // === STATUS MESSAGES ===
            Message::StatusHeader => "Vigil Status".to_string(),
            Message::ScreenTimeToday(time) => format!("Screen time today: {}", time),
            Message::DaemonRunningWithPid(pid) => format!("Daemon: running (PID: {})", pid),
            Message::DaemonDown => "Daemon: not running".to_string(),
            Message::RecentActivityHeader => "Recent activity".to_string(),
            Message::NoActivityRecorded => "No activity recorded yet".to_string(),
            Message::PendingTasksCount(count) => format!("Pending tasks: {}", count),
            Message::LastBreakMinutesAgo(minutes) => format!("Last break: {} minutes ago", minutes),
            Message::NoBreaksToday => "No breaks recorded today".to_string(),

            // === TASK MESSAGES ===
            Message::TaskCreated(name) => format!("Task '{}' created", name),
            Message::TaskCompleted(id) => format!("Task {} marked as complete", id),
            Message::TaskNotFoundWithId(id) => format!("Task with ID {} not found", id),
            Message::TasksNotFound => "No pending tasks".to_string(),

            // === SUGGESTION MESSAGES ===
            Message::OllamaUnreachable(url) => {
                format!("Cannot connect to Ollama at {}. Make sure it's running: ollama serve", url)
            }
            Message::SuggestHealthHeader => "Health suggestion".to_string(),
            Message::SuggestTasksHeader => "Task prioritization".to_string(),
            Message::SuggestNotEnoughActivity => "Not enough work activity today to generate suggestions".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path) => format!("Data exported to {}", path),
            Message::UnsupportedExportFormat(format) => format!("Unsupported export format: {}", format),
        };
        write!(f, "{}", text)
    }
}
