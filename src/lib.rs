//! # Vigil - Activity and Health Monitoring
//!
//! A command-line utility that monitors user activity, aggregates work
//! sessions and screen time, and delivers health reminders.
//!
//! ## Features
//!
//! - **Activity Monitoring**: Automatic detection of active and idle periods
//! - **Work Sessions**: Contiguous active time aggregated into sessions
//! - **Health Reminders**: Break, posture, eye-care, and hydration nudges
//! - **Background Daemon**: Single-instance daemon with graceful shutdown
//! - **AI Suggestions**: Health and task suggestions via a local Ollama model
//! - **Data Export**: Export collected data to CSV and JSON formats
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vigil::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
