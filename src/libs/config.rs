//! Configuration management for the vigil application.
//!
//! Handles application settings for activity monitoring, health reminders,
//! and the optional Ollama integration. Supports both programmatic access
//! and an interactive setup wizard.
//!
//! ## Core Features
//!
//! - **Activity Monitoring**: Sampling interval and idle threshold settings
//! - **Health Reminders**: Per-kind reminder thresholds
//! - **Ollama Integration**: Local LLM endpoint for the suggest command
//! - **Interactive Setup**: Guided configuration wizard for all modules
//! - **Cross-Platform Persistence**: JSON storage in the platform data directory
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use vigil::libs::config::Config;
//!
//! // Load existing configuration or create default
//! let config = Config::read()?;
//!
//! // Run interactive configuration setup
//! let updated_config = Config::init()?;
//! updated_config.save()?;
//! # anyhow::Ok(())
//! ```

use super::data_storage::DataStorage;
use crate::api::ollama::OllamaConfig;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Represents a configurable module in the application.
///
/// Used during interactive setup to display available modules and route the
/// user's selection to the right configuration prompts.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Unique identifier for the module used in configuration routing
    pub key: String,
    /// Display name shown to users during interactive setup
    pub name: String,
}

/// Activity monitor configuration settings.
///
/// Controls how often input activity is sampled and how long a silence has
/// to last before the user is classified as idle. Both values feed directly
/// into work-session detection, so the idle threshold should be long enough
/// to survive reading and thinking pauses.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MonitorConfig {
    /// Sampling interval in seconds between activity ticks.
    ///
    /// Every tick reads the time since the last input event, classifies the
    /// user as active or idle, and persists an activity sample. Lower values
    /// give finer-grained sessions at the cost of more database writes.
    pub sample_interval: u64,

    /// Inactivity threshold in seconds before the user counts as idle.
    ///
    /// When no keyboard or mouse input has been seen for this long, the
    /// current work session is considered over. The session is closed at the
    /// time the last input was seen, not at the detection time.
    pub idle_threshold: u64,
}

/// Health reminder thresholds, all in minutes.
///
/// Break, posture, and eye-care reminders count only active screen time and
/// pause while the user is idle. Hydration counts wall-clock time since it
/// is not tied to screen exposure.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HealthConfig {
    /// Minutes of continuous active work before a break reminder.
    pub break_threshold: u64,

    /// Minutes between posture reminders.
    pub posture_threshold: u64,

    /// Minutes between eye care reminders (the 20-20-20 rule).
    pub eye_care_threshold: u64,

    /// Minutes between hydration reminders, counted on wall-clock time.
    pub hydration_threshold: u64,
}

/// Main configuration container for the entire application.
///
/// Each field is an optional module so users configure only what they need;
/// missing modules fall back to defaults at the point of use. Unconfigured
/// modules are omitted from the JSON output.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    /// Activity monitoring configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<MonitorConfig>,

    /// Health reminder thresholds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthConfig>,

    /// Ollama API integration for AI suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ollama: Option<OllamaConfig>,
}

impl Default for MonitorConfig {
    /// Default values:
    /// - 10 second sampling interval
    /// - 300 seconds (5 minutes) of silence before the user counts as idle
    fn default() -> Self {
        MonitorConfig {
            sample_interval: 10,
            idle_threshold: 300,
        }
    }
}

impl Default for HealthConfig {
    /// Default values:
    /// - break after 50 minutes of continuous active work
    /// - posture reminder every 30 minutes
    /// - eye care reminder every 20 minutes (20-20-20 rule)
    /// - hydration reminder every 60 minutes of wall-clock time
    fn default() -> Self {
        HealthConfig {
            break_threshold: 50,
            posture_threshold: 30,
            eye_care_threshold: 20,
            hydration_threshold: 60,
        }
    }
}

impl Config {
    /// Reads configuration from the filesystem.
    ///
    /// Returns a default configuration when no file exists yet, so the
    /// application runs without any prior setup.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the current configuration to the filesystem.
    ///
    /// The JSON output is pretty-printed for manual editing.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Runs an interactive configuration setup wizard.
    ///
    /// Presents a multi-select list of the available modules (monitor,
    /// health, ollama), pre-filling existing values as defaults, and returns
    /// the updated configuration for saving.
    pub fn init() -> Result<Self> {
        // Load existing configuration to use as defaults for the setup wizard
        let mut config = Self::read().unwrap_or_default();

        let node_descriptions = vec![
            ConfigModule {
                key: "monitor".to_string(),
                name: "Monitor".to_string(),
            },
            ConfigModule {
                key: "health".to_string(),
                name: "Health".to_string(),
            },
            OllamaConfig::module(),
        ];

        let selected_nodes = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&node_descriptions.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected_nodes {
            match node_descriptions[selection].key.as_str() {
                "monitor" => {
                    let default = config.monitor.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleMonitor);
                    config.monitor = Some(MonitorConfig {
                        sample_interval: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptSampleInterval.to_string())
                            .default(default.sample_interval)
                            .interact_text()?,
                        idle_threshold: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptIdleThreshold.to_string())
                            .default(default.idle_threshold)
                            .interact_text()?,
                    });
                }
                "health" => {
                    let default = config.health.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleHealth);
                    config.health = Some(HealthConfig {
                        break_threshold: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptBreakThreshold.to_string())
                            .default(default.break_threshold)
                            .interact_text()?,
                        posture_threshold: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptPostureThreshold.to_string())
                            .default(default.posture_threshold)
                            .interact_text()?,
                        eye_care_threshold: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptEyeCareThreshold.to_string())
                            .default(default.eye_care_threshold)
                            .interact_text()?,
                        hydration_threshold: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptHydrationThreshold.to_string())
                            .default(default.hydration_threshold)
                            .interact_text()?,
                    });
                }
                "ollama" => config.ollama = Some(OllamaConfig::init(&config.ollama)?),
                _ => {} // Unknown module keys are safely ignored
            }
        }

        Ok(config)
    }
}
