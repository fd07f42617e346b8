//! Ollama API client for local LLM text generation.
//!
//! Talks to a locally running Ollama instance to generate health and task
//! suggestions. All generation happens on the user's machine; nothing ever
//! leaves it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vigil::api::ollama::{Ollama, OllamaConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = OllamaConfig::default();
//! let client = Ollama::new(&config);
//!
//! if client.test_connection().await {
//!     let suggestion = client.generate("Suggest a stretch", 150).await?;
//! }
//! # Ok(())
//! # }
//! ```

use crate::libs::config::ConfigModule;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Ollama connection parameters.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OllamaConfig {
    /// Base URL of the Ollama HTTP API.
    pub api_url: String,
    /// Model name to run generations against.
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        OllamaConfig {
            api_url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
        }
    }
}

impl OllamaConfig {
    /// Module descriptor for the configuration wizard.
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "ollama".to_string(),
            name: "Ollama".to_string(),
        }
    }

    /// Interactive setup for the Ollama module.
    pub fn init(config: &Option<OllamaConfig>) -> Result<Self> {
        let default = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleOllama);
        Ok(OllamaConfig {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptOllamaApiUrl.to_string())
                .default(default.api_url)
                .interact_text()?,
            model: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptOllamaModel.to_string())
                .default(default.model)
                .interact_text()?,
        })
    }
}

/// Request body for the Ollama generate endpoint.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    num_predict: u32,
}

/// Response body for a non-streaming generation.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Ollama API client.
///
/// The client is stateless and thread-safe; each call builds a fresh
/// request against the configured endpoint.
#[derive(Debug)]
pub struct Ollama {
    client: Client,
    config: OllamaConfig,
}

impl Ollama {
    pub fn new(config: &OllamaConfig) -> Self {
        Ollama {
            client: Client::new(),
            config: config.clone(),
        }
    }

    /// Checks whether the Ollama endpoint is reachable.
    pub async fn test_connection(&self) -> bool {
        let url = format!("{}/api/tags", self.config.api_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Generates a completion for the given prompt.
    pub async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let url = format!("{}/api/generate", self.config.api_url);
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: GenerateOptions { num_predict: max_tokens },
        };

        let response = self.client.post(&url).json(&request).send().await?.error_for_status()?;
        let body: GenerateResponse = response.json().await?;
        Ok(body.response.trim().to_string())
    }

    /// Base URL of the configured endpoint, for diagnostics.
    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }
}
