//! Scripted collaborators for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

use crate::errors::{CompletionError, ProcessingError};
use crate::meetings::{Task, TranscriptProcessor};
use crate::providers::{CompletionResponse, CompletionService};

/// A completion service that replays queued replies and records prompts.
///
/// When the queue is empty it answers with the fallback reply.
#[derive(Debug)]
pub struct ScriptedCompletionService {
    replies: Mutex<VecDeque<Result<CompletionResponse, CompletionError>>>,
    fallback: String,
    prompts: Mutex<Vec<String>>,
    delay: Duration,
}

impl ScriptedCompletionService {
    /// Creates a service that always answers `fallback`.
    #[must_use]
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: fallback.into(),
            prompts: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    /// Queues a successful reply.
    #[must_use]
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.replies
            .lock()
            .push_back(Ok(CompletionResponse::text(content)));
        self
    }

    /// Queues a failure.
    #[must_use]
    pub fn with_error(self, error: CompletionError) -> Self {
        self.replies.lock().push_back(Err(error));
        self
    }

    /// Delays every reply.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }

    /// Returns every prompt received, in order.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletionService {
    async fn complete(
        &self,
        api_key: &str,
        prompt: &str,
    ) -> Result<CompletionResponse, CompletionError> {
        self.prompts.lock().push(prompt.to_string());
        if self.delay > Duration::ZERO {
            tokio::time::sleep(self.delay).await;
        }
        if api_key.trim().is_empty() {
            return Err(CompletionError::MissingApiKey);
        }
        let next = self.replies.lock().pop_front();
        next.unwrap_or_else(|| Ok(CompletionResponse::text(self.fallback.clone())))
    }
}

/// A completion service that always fails with the same error.
#[derive(Debug, Clone)]
pub struct FailingCompletionService {
    error: CompletionError,
}

impl FailingCompletionService {
    /// Creates a service returning `error` on every call.
    #[must_use]
    pub fn new(error: CompletionError) -> Self {
        Self { error }
    }

    /// Creates a service answering with an HTTP 500.
    #[must_use]
    pub fn server_error() -> Self {
        Self::new(CompletionError::Status {
            status: 500,
            body: "internal error".to_string(),
        })
    }
}

#[async_trait]
impl CompletionService for FailingCompletionService {
    async fn complete(
        &self,
        _api_key: &str,
        _prompt: &str,
    ) -> Result<CompletionResponse, CompletionError> {
        Err(self.error.clone())
    }
}

/// A transcript processor whose every call fails.
#[derive(Debug, Clone)]
pub struct FailingTranscriptProcessor {
    error: ProcessingError,
}

impl FailingTranscriptProcessor {
    /// Creates a processor returning `error`.
    #[must_use]
    pub fn new(error: ProcessingError) -> Self {
        Self { error }
    }
}

impl Default for FailingTranscriptProcessor {
    fn default() -> Self {
        Self::new(ProcessingError::Summary("processor unavailable".to_string()))
    }
}

#[async_trait]
impl TranscriptProcessor for FailingTranscriptProcessor {
    async fn summarize(&self, _transcript: &str) -> Result<String, ProcessingError> {
        Err(self.error.clone())
    }

    async fn extract_tasks(&self, _transcript: &str) -> Result<Vec<Task>, ProcessingError> {
        Err(self.error.clone())
    }
}
