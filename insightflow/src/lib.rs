//! # Insightflow
//!
//! Meeting intelligence plus a small automation pipeline console.
//!
//! Insightflow provides:
//!
//! - **Automation console**: a terminal that accepts `help`, `status`, `clear`
//!   and `run <command>`, echoing every command into a retained log
//! - **Four-phase pipeline**: `cli`, `python`, `perplexity` and `github` run in
//!   order; the `perplexity` phase optionally asks a chat-completions API
//! - **Workflow history**: the five most recent runs, newest first
//! - **Meeting workspace**: transcript upload, summary, action items, task
//!   editing and plain-text export
//!
//! ## Quick Start
//!
//! ```rust
//! use insightflow::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let console = AutomationConsole::new(PipelineConfig::instant());
//! console.submit("run deploy").await;
//!
//! assert_eq!(console.runs().len(), 1);
//! assert_eq!(console.log().last().unwrap().text, "GitHub Actions workflow completed");
//! # });
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod commands;
pub mod config;
pub mod console;
pub mod core;
pub mod errors;
pub mod events;
pub mod history;
pub mod meetings;
pub mod observability;
pub mod pipeline;
pub mod providers;
pub mod stages;
pub mod testing;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::commands::{Command, BANNER, HELP_TEXT};
    pub use crate::config::{AppConfig, CompletionConfig, PipelineConfig, ProcessingConfig};
    pub use crate::console::{
        AutomationConsole, CommandOutcome, ConsoleSnapshot, LogEntry, LogEvent, LogKind,
    };
    pub use crate::core::{MeetingStatus, Priority, RunStatus, StageStatus};
    pub use crate::errors::{
        CompletionError, InsightflowError, ProcessingError, Result, UploadError,
    };
    pub use crate::events::{
        LoggingNotificationSink, NoOpNotificationSink, Notification, NotificationSink,
    };
    pub use crate::history::{HistoryStore, Identified, WorkflowRun};
    pub use crate::meetings::{
        export_meeting, read_transcript_file, render_export, CompletionTranscriptProcessor,
        HeuristicProcessor, Meeting, MeetingWorkspace, Task, TaskUpdate, TranscriptProcessor,
    };
    pub use crate::pipeline::{PipelineHost, RunReport, WorkflowRunner};
    #[cfg(feature = "http")]
    pub use crate::providers::PerplexityClient;
    pub use crate::providers::{CompletionResponse, CompletionService};
    pub use crate::stages::{Phase, StageInfo, StageTracker};
    pub use crate::utils::{generate_id, iso_timestamp, Timestamp};
}
