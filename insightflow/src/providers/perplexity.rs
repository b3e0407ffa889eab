//! HTTP client for a Perplexity-style chat-completions endpoint.

use super::completion::{parse_chat_response, ChatRequest, CompletionResponse, CompletionService};
use crate::config::CompletionConfig;
use crate::errors::CompletionError;
use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, warn};

/// Longest response body kept in a status error.
const MAX_ERROR_BODY: usize = 512;

/// Completion service backed by an HTTP chat-completions API.
#[derive(Debug, Clone)]
pub struct PerplexityClient {
    http: reqwest::Client,
    config: CompletionConfig,
}

impl PerplexityClient {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns `CompletionError::Transport` if the HTTP client cannot be built.
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    fn map_send_error(&self, err: &reqwest::Error) -> CompletionError {
        if err.is_timeout() {
            CompletionError::Timeout(self.config.timeout_seconds.unwrap_or_default())
        } else {
            CompletionError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl CompletionService for PerplexityClient {
    async fn complete(
        &self,
        api_key: &str,
        prompt: &str,
    ) -> Result<CompletionResponse, CompletionError> {
        if api_key.trim().is_empty() {
            return Err(CompletionError::MissingApiKey);
        }

        let request = ChatRequest::from_config(&self.config, prompt);
        let started = Instant::now();
        debug!(endpoint = %self.config.endpoint, model = %self.config.model, "Sending completion request");

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Completion request rejected");
            let body = body.chars().take(MAX_ERROR_BODY).collect();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let mut parsed = parse_chat_response(&body)?;
        parsed.latency_ms = Some(started.elapsed().as_secs_f64() * 1000.0);
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_keeps_config() {
        let client = PerplexityClient::new(CompletionConfig::default().with_timeout(3.0)).unwrap();
        assert_eq!(client.config().timeout_seconds, Some(3.0));
    }

    #[tokio::test]
    async fn test_blank_key_rejected_without_request() {
        let client = PerplexityClient::new(CompletionConfig::default()).unwrap();
        let err = client.complete("  ", "hello").await.unwrap_err();
        assert_eq!(err, CompletionError::MissingApiKey);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let config = CompletionConfig::default()
            .with_endpoint("http://127.0.0.1:9/chat/completions")
            .with_timeout(2.0);
        let client = PerplexityClient::new(config).unwrap();

        let err = client.complete("key", "hello").await.unwrap_err();
        assert!(matches!(
            err,
            CompletionError::Transport(_) | CompletionError::Timeout(_)
        ));
    }
}
