//! Error types for insightflow.
//!
//! Pipeline and transcript failures are normally absorbed into state and
//! surfaced through the terminal log or a notification. The types here cover
//! the collaborators that can fail and the caller-facing contract violations.

use thiserror::Error;

/// The main error type for insightflow operations.
#[derive(Debug, Error)]
pub enum InsightflowError {
    /// The completion service failed.
    #[error("{0}")]
    Completion(#[from] CompletionError),

    /// Transcript processing failed.
    #[error("{0}")]
    Processing(#[from] ProcessingError),

    /// A transcript upload was rejected.
    #[error("{0}")]
    Upload(#[from] UploadError),

    /// The component is already working on a previous request.
    #[error("Busy: {0}")]
    Busy(String),

    /// A referenced item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Two stages were declared with the same id.
    #[error("Duplicate stage id: {0}")]
    DuplicateStage(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the external completion service.
///
/// Callers treat every variant uniformly as an API error; the variants exist
/// for diagnostics only.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompletionError {
    /// No credential has been configured.
    #[error("No API key configured")]
    MissingApiKey,

    /// The request could not be sent or the connection failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("API returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The request timed out.
    #[error("Request timed out after {0:.1}s")]
    Timeout(f64),
}

/// Errors from a transcript processor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProcessingError {
    /// Summary generation failed.
    #[error("Summary generation failed: {0}")]
    Summary(String),

    /// Task extraction failed.
    #[error("Task extraction failed: {0}")]
    TaskExtraction(String),

    /// The processor's backing service failed.
    #[error("Processor backend failed: {0}")]
    Backend(#[from] CompletionError),
}

/// Errors raised when accepting a transcript.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The transcript text is empty after trimming.
    #[error("Transcript cannot be empty")]
    EmptyTranscript,

    /// The meeting title is empty after trimming.
    #[error("Meeting title cannot be empty")]
    EmptyTitle,

    /// The file is not valid UTF-8 text.
    #[error("File '{0}' is not valid UTF-8 text")]
    NotText(String),

    /// The file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        /// The path that failed.
        path: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for insightflow operations.
pub type Result<T, E = InsightflowError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_error_display() {
        let err = CompletionError::Status {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "API returned status 401: unauthorized");
        assert_eq!(CompletionError::MissingApiKey.to_string(), "No API key configured");
    }

    #[test]
    fn test_timeout_compares_and_wraps() {
        let err = CompletionError::Timeout(2.5);
        assert_eq!(err, CompletionError::Timeout(2.5));
        assert_ne!(err, CompletionError::Timeout(3.0));
        assert_eq!(err.to_string(), "Request timed out after 2.5s");

        let wrapped = ProcessingError::from(err.clone());
        assert_eq!(wrapped, ProcessingError::Backend(err));
    }

    #[test]
    fn test_processing_error_from_completion() {
        let err: ProcessingError = CompletionError::Transport("refused".into()).into();
        assert!(matches!(err, ProcessingError::Backend(_)));
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn test_insightflow_error_conversions() {
        let err: InsightflowError = UploadError::EmptyTitle.into();
        assert_eq!(err.to_string(), "Meeting title cannot be empty");

        let err: InsightflowError = ProcessingError::Summary("boom".into()).into();
        assert!(matches!(err, InsightflowError::Processing(_)));

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: InsightflowError = io.into();
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_upload_read_error_has_source() {
        use std::error::Error as _;

        let err = UploadError::Read {
            path: "notes.txt".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("notes.txt"));
    }
}
