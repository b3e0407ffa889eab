//! Configuration types.
//!
//! Every struct deserializes from partial JSON; missing fields fall back to
//! the defaults below.

use crate::console::DEFAULT_LOG_RETENTION;
use crate::errors::InsightflowError;
use crate::history::DEFAULT_RUN_HISTORY;
use crate::stages::Phase;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable consulted for the completion-service credential.
pub const API_KEY_ENV: &str = "PERPLEXITY_API_KEY";

/// Configuration for the external completion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Chat-completions endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// System instruction sent with every request.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Nucleus sampling parameter.
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    /// Maximum tokens in the reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Optional request timeout in seconds. `None` waits indefinitely.
    #[serde(default)]
    pub timeout_seconds: Option<f64>,
}

fn default_endpoint() -> String {
    "https://api.perplexity.ai/chat/completions".to_string()
}

fn default_model() -> String {
    "llama-3.1-sonar-small-128k-online".to_string()
}

fn default_system_prompt() -> String {
    "Be precise and concise.".to_string()
}

fn default_temperature() -> f64 {
    0.2
}

fn default_top_p() -> f64 {
    0.9
}

fn default_max_tokens() -> u32 {
    1000
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            system_prompt: default_system_prompt(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_tokens: default_max_tokens(),
            timeout_seconds: None,
        }
    }
}

impl CompletionConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Gets the timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs_f64)
    }
}

/// Configuration for the automation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Simulated duration of the `cli` phase in milliseconds.
    #[serde(default = "default_cli_ms")]
    pub cli_ms: u64,
    /// Simulated duration of the `python` phase in milliseconds.
    #[serde(default = "default_python_ms")]
    pub python_ms: u64,
    /// Simulated duration of the `perplexity` phase when no key is configured.
    #[serde(default = "default_perplexity_ms")]
    pub perplexity_ms: u64,
    /// Simulated duration of the `github` phase in milliseconds.
    #[serde(default = "default_github_ms")]
    pub github_ms: u64,
    /// Number of workflow runs kept in history.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Terminal log retention. `None` keeps every entry.
    #[serde(default = "default_log_retention")]
    pub log_retention: Option<usize>,
}

fn default_cli_ms() -> u64 {
    1000
}

fn default_python_ms() -> u64 {
    2000
}

fn default_perplexity_ms() -> u64 {
    1500
}

fn default_github_ms() -> u64 {
    2000
}

fn default_history_capacity() -> usize {
    DEFAULT_RUN_HISTORY
}

#[allow(clippy::unnecessary_wraps)]
fn default_log_retention() -> Option<usize> {
    Some(DEFAULT_LOG_RETENTION)
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cli_ms: default_cli_ms(),
            python_ms: default_python_ms(),
            perplexity_ms: default_perplexity_ms(),
            github_ms: default_github_ms(),
            history_capacity: default_history_capacity(),
            log_retention: default_log_retention(),
        }
    }
}

impl PipelineConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration with no simulated delays.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            cli_ms: 0,
            python_ms: 0,
            perplexity_ms: 0,
            github_ms: 0,
            ..Self::default()
        }
    }

    /// Sets the history capacity.
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Sets the log retention.
    #[must_use]
    pub fn with_log_retention(mut self, retention: Option<usize>) -> Self {
        self.log_retention = retention;
        self
    }

    /// Returns the simulated duration of a phase.
    #[must_use]
    pub fn phase_delay(&self, phase: Phase) -> Duration {
        let ms = match phase {
            Phase::Cli => self.cli_ms,
            Phase::Python => self.python_ms,
            Phase::Perplexity => self.perplexity_ms,
            Phase::Github => self.github_ms,
        };
        Duration::from_millis(ms)
    }
}

/// Configuration for transcript processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Delay before analysis starts, in milliseconds.
    #[serde(default = "default_analysis_ms")]
    pub analysis_ms: u64,
    /// Simulated summary latency, in milliseconds.
    #[serde(default = "default_summary_ms")]
    pub summary_ms: u64,
    /// Simulated task-extraction latency, in milliseconds.
    #[serde(default = "default_extraction_ms")]
    pub extraction_ms: u64,
}

fn default_analysis_ms() -> u64 {
    2000
}

fn default_summary_ms() -> u64 {
    1000
}

fn default_extraction_ms() -> u64 {
    800
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            analysis_ms: default_analysis_ms(),
            summary_ms: default_summary_ms(),
            extraction_ms: default_extraction_ms(),
        }
    }
}

impl ProcessingConfig {
    /// A configuration with no simulated delays.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            analysis_ms: 0,
            summary_ms: 0,
            extraction_ms: 0,
        }
    }

    /// Delay before analysis starts.
    #[must_use]
    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_ms)
    }

    /// Simulated summary latency.
    #[must_use]
    pub fn summary_delay(&self) -> Duration {
        Duration::from_millis(self.summary_ms)
    }

    /// Simulated task-extraction latency.
    #[must_use]
    pub fn extraction_delay(&self) -> Duration {
        Duration::from_millis(self.extraction_ms)
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Completion service settings.
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Pipeline settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Transcript processing settings.
    #[serde(default)]
    pub processing: ProcessingConfig,
    /// Completion-service credential.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

impl AppConfig {
    /// Loads configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InsightflowError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            InsightflowError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    /// Parses configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(raw: &str) -> Result<Self, InsightflowError> {
        serde_json::from_str(raw).map_err(|e| InsightflowError::Config(e.to_string()))
    }

    /// Sets the credential; blank keys are ignored.
    #[must_use]
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// Fills the credential from `PERPLEXITY_API_KEY` when not already set.
    #[must_use]
    pub fn with_env_api_key(self) -> Self {
        if self.api_key.is_some() {
            return self;
        }
        let key = std::env::var(API_KEY_ENV).ok();
        self.with_api_key(key)
    }
}
