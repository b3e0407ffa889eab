//! The state a pipeline run writes into.

use crate::console::LogEntry;
use crate::core::StageStatus;
use crate::history::WorkflowRun;
use crate::stages::Phase;

/// Intention-revealing operations the runner performs on shared state.
///
/// The console implements this over its single state aggregate so a run
/// never observes a half-applied update.
pub trait PipelineHost: Send + Sync {
    /// Sets the status of a phase's stage.
    fn advance_phase(&self, phase: Phase, status: StageStatus);

    /// Appends a terminal log entry.
    fn append_log(&self, entry: LogEntry);

    /// Records a finished workflow run in history.
    fn record_run(&self, run: WorkflowRun);

    /// Returns the configured credential, if any.
    fn api_key(&self) -> Option<String>;
}
