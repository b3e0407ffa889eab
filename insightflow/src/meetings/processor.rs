//! Transcript processors: summary and action-item extraction.

use super::model::Task;
use crate::config::ProcessingConfig;
use crate::core::Priority;
use crate::errors::ProcessingError;
use crate::providers::CompletionService;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Closing sentence appended to every heuristic summary.
pub const SUMMARY_TAIL: &str =
    "The meeting covered important strategic decisions and next steps for the project.";

/// Turns a raw transcript into a summary and a list of action items.
///
/// The two operations are independent and may run concurrently.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptProcessor: Send + Sync {
    /// Produces a summary. May be empty.
    async fn summarize(&self, transcript: &str) -> Result<String, ProcessingError>;

    /// Extracts zero or more action items.
    async fn extract_tasks(&self, transcript: &str) -> Result<Vec<Task>, ProcessingError>;
}

/// Builds the heuristic summary from the first three sentences.
///
/// ```
/// use insightflow::meetings::heuristic_summary;
///
/// let summary = heuristic_summary("We shipped. Budget is fine. Hire two. Lunch.");
/// assert!(summary.starts_with("Key Discussion Points: We shipped. Budget is fine. Hire two. The meeting"));
/// ```
#[must_use]
pub fn heuristic_summary(transcript: &str) -> String {
    let key_points: Vec<&str> = transcript
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(3)
        .collect();
    format!("Key Discussion Points: {}. {SUMMARY_TAIL}", key_points.join(". "))
}

/// The three fixed action items returned by [`HeuristicProcessor`].
#[must_use]
pub fn canned_tasks() -> Vec<Task> {
    vec![
        Task::new("Follow up on project timeline discussion", Priority::High),
        Task::new("Prepare quarterly review presentation", Priority::Medium),
        Task::new("Schedule follow-up meeting with stakeholders", Priority::Low),
    ]
}

async fn pause(delay: Duration) {
    if delay > Duration::ZERO {
        tokio::time::sleep(delay).await;
    }
}

/// Deterministic processor: sentence-based summary and canned tasks.
#[derive(Debug, Clone, Default)]
pub struct HeuristicProcessor {
    config: ProcessingConfig,
}

impl HeuristicProcessor {
    /// Creates a processor with the given simulated delays.
    #[must_use]
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl TranscriptProcessor for HeuristicProcessor {
    async fn summarize(&self, transcript: &str) -> Result<String, ProcessingError> {
        pause(self.config.summary_delay()).await;
        Ok(heuristic_summary(transcript))
    }

    async fn extract_tasks(&self, _transcript: &str) -> Result<Vec<Task>, ProcessingError> {
        pause(self.config.extraction_delay()).await;
        Ok(canned_tasks())
    }
}

#[derive(Debug, Deserialize)]
struct ExtractedTask {
    description: String,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    assignee: Option<String>,
    #[serde(default, alias = "dueDate")]
    due_date: Option<String>,
}

impl From<ExtractedTask> for Task {
    fn from(raw: ExtractedTask) -> Self {
        let priority = raw
            .priority
            .and_then(|p| p.parse().ok())
            .unwrap_or_default();
        let mut task = Task::new(raw.description.trim(), priority);
        task.assignee = raw.assignee.filter(|a| !a.trim().is_empty());
        task.due_date = raw.due_date.filter(|d| !d.trim().is_empty());
        task
    }
}

/// Parses a JSON array of tasks out of a model reply.
///
/// The array may be surrounded by prose or a code fence. Entries with a blank
/// description are dropped.
pub fn parse_task_list(reply: &str) -> Result<Vec<Task>, ProcessingError> {
    let (Some(start), Some(end)) = (reply.find('['), reply.rfind(']')) else {
        return Err(ProcessingError::TaskExtraction(
            "reply does not contain a JSON array".to_string(),
        ));
    };
    if end < start {
        return Err(ProcessingError::TaskExtraction(
            "reply does not contain a JSON array".to_string(),
        ));
    }

    let raw: Vec<ExtractedTask> = serde_json::from_str(&reply[start..=end])
        .map_err(|e| ProcessingError::TaskExtraction(e.to_string()))?;

    Ok(raw
        .into_iter()
        .filter(|t| !t.description.trim().is_empty())
        .map(Task::from)
        .collect())
}

/// Processor backed by the external completion service.
pub struct CompletionTranscriptProcessor {
    service: Arc<dyn CompletionService>,
    api_key: String,
}

impl std::fmt::Debug for CompletionTranscriptProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionTranscriptProcessor")
            .finish_non_exhaustive()
    }
}

impl CompletionTranscriptProcessor {
    /// Creates a processor that authenticates with `api_key`.
    #[must_use]
    pub fn new(service: Arc<dyn CompletionService>, api_key: impl Into<String>) -> Self {
        Self {
            service,
            api_key: api_key.into(),
        }
    }

    fn summary_prompt(transcript: &str) -> String {
        format!(
            "Summarize the key discussion points of this meeting transcript in a short paragraph:\n\n{transcript}"
        )
    }

    fn tasks_prompt(transcript: &str) -> String {
        format!(
            "Extract the action items from this meeting transcript. Reply with only a JSON array of \
             objects with the fields \"description\", \"priority\" (low, medium or high) and \
             optionally \"assignee\".\n\n{transcript}"
        )
    }
}

#[async_trait]
impl TranscriptProcessor for CompletionTranscriptProcessor {
    async fn summarize(&self, transcript: &str) -> Result<String, ProcessingError> {
        let response = self
            .service
            .complete(&self.api_key, &Self::summary_prompt(transcript))
            .await?;
        debug!(tokens = response.total_tokens(), "Summary generated");
        Ok(response.content.trim().to_string())
    }

    async fn extract_tasks(&self, transcript: &str) -> Result<Vec<Task>, ProcessingError> {
        let response = self
            .service
            .complete(&self.api_key, &Self::tasks_prompt(transcript))
            .await?;
        let tasks = parse_task_list(&response.content)?;
        debug!(count = tasks.len(), "Tasks extracted");
        Ok(tasks)
    }
}
