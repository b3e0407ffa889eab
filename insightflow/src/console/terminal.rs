//! The automation console: one aggregate owning stages, log and run history.

use super::log::{LogEntry, TerminalLog};
use crate::commands::{format_status_line, Command, HELP_TEXT};
use crate::config::PipelineConfig;
use crate::core::StageStatus;
use crate::events::{NoOpNotificationSink, Notification, NotificationSink};
use crate::history::{HistoryStore, WorkflowRun};
use crate::pipeline::{PipelineHost, RunReport, WorkflowRunner};
use crate::providers::CompletionService;
use crate::stages::{Phase, StageInfo, StageTracker};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Logged when `run` is submitted while a run is in flight.
pub const ALREADY_RUNNING: &str = "Pipeline is already running. Please wait for it to finish.";

const EVENT_CAPACITY: usize = 256;

/// A change to the terminal log, for live subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// An entry was appended.
    Appended(LogEntry),
    /// The log was reset to the banner.
    Cleared,
}

/// What a submitted line did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The line was blank; nothing was logged.
    Ignored,
    /// Help text was printed.
    Help,
    /// The status line was printed.
    Status(String),
    /// The log was cleared.
    Cleared,
    /// The pipeline ran.
    Ran(RunReport),
    /// A run was already in flight; the request was rejected.
    Busy,
    /// The command was not recognised.
    NotFound(String),
}

/// A serializable view of the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleSnapshot {
    /// Stages in order.
    pub stages: Vec<StageInfo>,
    /// Id of the stage currently processing.
    pub active_stage: Option<String>,
    /// Terminal log.
    pub log: Vec<LogEntry>,
    /// Workflow runs, newest first.
    pub runs: Vec<WorkflowRun>,
    /// Whether a run is in flight.
    pub processing: bool,
    /// Whether a credential is configured.
    pub api_key_configured: bool,
}

#[derive(Debug)]
struct ConsoleState {
    stages: StageTracker,
    log: TerminalLog,
    runs: HistoryStore<WorkflowRun>,
    api_key: Option<String>,
    running: bool,
}

#[derive(Debug)]
struct Shared {
    state: Mutex<ConsoleState>,
    events: broadcast::Sender<LogEvent>,
}

impl Shared {
    fn push_log(&self, entry: LogEntry) {
        self.state.lock().log.push(entry.clone());
        // No subscribers is fine.
        let _ = self.events.send(LogEvent::Appended(entry));
    }
}

impl PipelineHost for Shared {
    fn advance_phase(&self, phase: Phase, status: StageStatus) {
        self.state.lock().stages.set_status(phase.id(), status);
    }

    fn append_log(&self, entry: LogEntry) {
        self.push_log(entry);
    }

    fn record_run(&self, run: WorkflowRun) {
        let mut state = self.state.lock();
        if let Some(evicted) = state.runs.append(run) {
            debug!(run_id = %evicted.id, "Dropped oldest workflow run");
        }
    }

    fn api_key(&self) -> Option<String> {
        self.state.lock().api_key.clone()
    }
}

/// Clears the running flag when a run ends, including when its future is dropped.
///
/// While armed, dropping it marks the stage that was processing as `error`.
struct RunGuard<'a> {
    shared: &'a Shared,
    armed: bool,
}

impl RunGuard<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        state.running = false;
        if self.armed {
            let active = state.stages.active_stage().map(|s| s.id.clone());
            if let Some(id) = &active {
                state.stages.set_status(id, StageStatus::Error);
            }
            warn!(stage = ?active, "Pipeline run cancelled");
        }
    }
}

/// Terminal front-end for the automation pipeline.
///
/// Each submitted line is echoed to the log, then dispatched. At most one
/// pipeline run is in flight; concurrent `run` submissions are rejected.
/// Share it behind an `Arc` to accept commands while a run is in progress.
pub struct AutomationConsole {
    shared: Shared,
    runner: WorkflowRunner,
    notifier: Arc<dyn NotificationSink>,
}

impl std::fmt::Debug for AutomationConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutomationConsole")
            .field("runner", &self.runner)
            .finish_non_exhaustive()
    }
}

impl Default for AutomationConsole {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl AutomationConsole {
    /// Creates a console with the startup banner and idle stages.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let state = ConsoleState {
            stages: StageTracker::pipeline(),
            log: TerminalLog::new(config.log_retention),
            runs: HistoryStore::bounded(config.history_capacity),
            api_key: None,
            running: false,
        };
        Self {
            shared: Shared {
                state: Mutex::new(state),
                events,
            },
            runner: WorkflowRunner::new(config),
            notifier: Arc::new(NoOpNotificationSink),
        }
    }

    /// Attaches the completion service for the `perplexity` phase.
    #[must_use]
    pub fn with_completion_service(mut self, service: Arc<dyn CompletionService>) -> Self {
        self.runner = self.runner.with_completion_service(service);
        self
    }

    /// Sets the notification sink.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Sets the credential.
    #[must_use]
    pub fn with_api_key(self, key: &str) -> Self {
        self.set_api_key(key);
        self
    }

    /// Handles one line of input.
    pub async fn submit(&self, input: &str) -> CommandOutcome {
        let line = input.trim();
        if line.is_empty() {
            return CommandOutcome::Ignored;
        }

        self.shared.push_log(LogEntry::command(line));

        match Command::parse(line) {
            Command::Help => {
                self.shared.push_log(LogEntry::output(HELP_TEXT));
                CommandOutcome::Help
            }
            Command::Status => {
                let status = self.status_line();
                self.shared.push_log(LogEntry::output(&status));
                CommandOutcome::Status(status)
            }
            Command::Clear => {
                self.shared.state.lock().log.reset_to_banner();
                let _ = self.shared.events.send(LogEvent::Cleared);
                CommandOutcome::Cleared
            }
            Command::Run(command) => self.run_pipeline(&command).await,
            Command::Unknown(original) => {
                self.shared
                    .push_log(LogEntry::error(Command::not_found_message(&original)));
                CommandOutcome::NotFound(original)
            }
        }
    }

    async fn run_pipeline(&self, command: &str) -> CommandOutcome {
        let Some(mut guard) = self.begin_run() else {
            info!(command = %command, "Rejected run while another is in flight");
            self.shared.push_log(LogEntry::error(ALREADY_RUNNING));
            return CommandOutcome::Busy;
        };

        let report = self.runner.run(&self.shared, command).await;
        guard.disarm();
        drop(guard);

        let notification = if report.succeeded() {
            Notification::info("Pipeline Complete", "Workflow executed successfully")
        } else {
            let failed: Vec<_> = report.failed_phases().into_iter().map(Phase::id).collect();
            Notification::failure(
                "Pipeline Complete",
                format!("Workflow finished with errors in: {}", failed.join(", ")),
            )
        };
        self.notifier.notify(notification).await;

        CommandOutcome::Ran(report)
    }

    fn begin_run(&self) -> Option<RunGuard<'_>> {
        let mut state = self.shared.state.lock();
        if state.running {
            return None;
        }
        state.running = true;
        state.stages.reset();
        Some(RunGuard {
            shared: &self.shared,
            armed: true,
        })
    }

    /// Sets the credential. Blank keys are ignored and return false.
    pub fn set_api_key(&self, key: &str) -> bool {
        let key = key.trim();
        if key.is_empty() {
            return false;
        }
        self.shared.state.lock().api_key = Some(key.to_string());
        true
    }

    /// Removes the credential.
    pub fn clear_api_key(&self) {
        self.shared.state.lock().api_key = None;
    }

    /// Returns true if a credential is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.shared.state.lock().api_key.is_some()
    }

    /// Returns true while a pipeline run is in flight.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.shared.state.lock().running
    }

    /// Returns the stage currently processing.
    #[must_use]
    pub fn active_stage(&self) -> Option<StageInfo> {
        self.shared.state.lock().stages.active_stage().cloned()
    }

    /// Returns the stages in order.
    #[must_use]
    pub fn stages(&self) -> Vec<StageInfo> {
        self.shared.state.lock().stages.stages().to_vec()
    }

    /// Returns the status of one phase.
    #[must_use]
    pub fn stage_status(&self, phase: Phase) -> Option<StageStatus> {
        self.shared.state.lock().stages.status(phase.id())
    }

    /// Returns the terminal log.
    #[must_use]
    pub fn log(&self) -> Vec<LogEntry> {
        self.shared.state.lock().log.entries()
    }

    /// Returns workflow runs, newest first.
    #[must_use]
    pub fn runs(&self) -> Vec<WorkflowRun> {
        self.shared.state.lock().runs.iter().cloned().collect()
    }

    /// Selects a workflow run for display. Returns false for unknown ids.
    pub fn select_run(&self, id: &str) -> bool {
        self.shared.state.lock().runs.select(id)
    }

    /// Returns the selected workflow run.
    #[must_use]
    pub fn selected_run(&self) -> Option<WorkflowRun> {
        self.shared.state.lock().runs.selected().cloned()
    }

    /// Formats the `status` response from current state.
    #[must_use]
    pub fn status_line(&self) -> String {
        let state = self.shared.state.lock();
        format_status_line(state.running, state.runs.len(), state.api_key.is_some())
    }

    /// Subscribes to log changes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LogEvent> {
        self.shared.events.subscribe()
    }

    /// Returns a consistent view of the whole console.
    #[must_use]
    pub fn snapshot(&self) -> ConsoleSnapshot {
        let state = self.shared.state.lock();
        ConsoleSnapshot {
            stages: state.stages.stages().to_vec(),
            active_stage: state.stages.active_stage().map(|s| s.id.clone()),
            log: state.log.entries(),
            runs: state.runs.iter().cloned().collect(),
            processing: state.running,
            api_key_configured: state.api_key.is_some(),
        }
    }
}
