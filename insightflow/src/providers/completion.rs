//! Completion service trait and chat-completions wire types.

use crate::config::CompletionConfig;
use crate::errors::CompletionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Builds the user message sent for a pipeline command.
#[must_use]
pub fn command_prompt(command: &str) -> String {
    format!("Process this CLI command and suggest automation steps: {command}")
}

/// A completion reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Reply text.
    pub content: String,
    /// Model that answered, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Prompt tokens, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u32>,
    /// Completion tokens, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u32>,
    /// Round-trip time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,
}

impl CompletionResponse {
    /// Creates a response carrying only text.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: None,
            input_tokens: None,
            output_tokens: None,
            latency_ms: None,
        }
    }

    /// Returns total tokens.
    #[must_use]
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens
            .unwrap_or(0)
            .saturating_add(self.output_tokens.unwrap_or(0))
    }
}

/// An opaque service that turns a prompt into text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends `prompt` using the bearer credential `api_key`.
    ///
    /// Any failure, whether transport, HTTP status or body shape, is an error.
    async fn complete(
        &self,
        api_key: &str,
        prompt: &str,
    ) -> Result<CompletionResponse, CompletionError>;
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system` or `user`.
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat-completions request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model name.
    pub model: String,
    /// Conversation, system prompt first.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f64,
    /// Nucleus sampling mass.
    pub top_p: f64,
    /// Reply length limit.
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Builds a request with the configured system prompt and one user message.
    #[must_use]
    pub fn from_config(config: &CompletionConfig, prompt: &str) -> Self {
        Self {
            model: config.model.clone(),
            messages: vec![
                ChatMessage::system(&config.system_prompt),
                ChatMessage::user(prompt),
            ],
            temperature: config.temperature,
            top_p: config.top_p,
            max_tokens: config.max_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
}

/// Extracts the first choice's message text from a chat-completions body.
///
/// # Errors
///
/// Returns `CompletionError::InvalidResponse` if the body is not JSON or has
/// no first choice with text content.
pub fn parse_chat_response(body: &str) -> Result<CompletionResponse, CompletionError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| CompletionError::InvalidResponse("missing choices[0].message.content".into()))?;

    Ok(CompletionResponse {
        content,
        model: parsed.model,
        input_tokens: parsed.usage.as_ref().and_then(|u| u.prompt_tokens),
        output_tokens: parsed.usage.as_ref().and_then(|u| u.completion_tokens),
        latency_ms: None,
    })
}
