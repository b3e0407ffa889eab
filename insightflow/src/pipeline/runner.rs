//! Sequential driver for the four-phase automation pipeline.

use super::host::PipelineHost;
use super::report::{PhaseOutcome, RunReport};
use crate::config::PipelineConfig;
use crate::console::LogEntry;
use crate::core::StageStatus;
use crate::history::WorkflowRun;
use crate::providers::{command_prompt, CompletionService};
use crate::stages::Phase;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, info_span, warn, Instrument};

/// Logged when the `cli` phase completes.
pub const CLI_DONE: &str = "Command processed";
/// Logged when the `python` phase completes.
pub const PYTHON_DONE: &str = "Python script executed";
/// Logged when the `perplexity` phase is simulated.
pub const PERPLEXITY_SIMULATED: &str = "Perplexity API simulation completed";
/// Logged when the completion service fails.
pub const PERPLEXITY_FAILED: &str = "Perplexity API error: request failed";
/// Prefix for a successful completion reply.
pub const AI_RESPONSE_PREFIX: &str = "AI Response: ";
/// Logged when the `github` phase completes.
pub const GITHUB_DONE: &str = "GitHub Actions workflow completed";

/// Drives a [`PipelineHost`] through `cli`, `python`, `perplexity`, `github`.
///
/// Phases run strictly in order. Only `perplexity` can fail, and its failure
/// does not stop the run: `github` still executes and records a workflow run.
#[derive(Clone)]
pub struct WorkflowRunner {
    config: PipelineConfig,
    completion: Option<Arc<dyn CompletionService>>,
}

impl std::fmt::Debug for WorkflowRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowRunner")
            .field("config", &self.config)
            .field("has_completion_service", &self.completion.is_some())
            .finish()
    }
}

impl WorkflowRunner {
    /// Creates a runner that simulates every phase.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            completion: None,
        }
    }

    /// Attaches the completion service used when a credential is configured.
    #[must_use]
    pub fn with_completion_service(mut self, service: Arc<dyn CompletionService>) -> Self {
        self.completion = Some(service);
        self
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs all phases for `command`, writing progress into `host`.
    pub async fn run(&self, host: &dyn PipelineHost, command: &str) -> RunReport {
        let started = Instant::now();
        let mut phases = Vec::with_capacity(Phase::ALL.len());
        let mut workflow_run = None;

        info!(command = %command, "Pipeline run started");

        for phase in Phase::ALL {
            let span = info_span!("phase", phase = %phase);
            let phase_started = Instant::now();
            host.advance_phase(phase, StageStatus::Processing);

            let outcome = async {
                let outcome = self.execute(host, phase, command, &mut workflow_run).await;
                if outcome.is_error() {
                    warn!(error = ?outcome.error, "Phase failed");
                } else {
                    info!("Phase completed");
                }
                outcome
            }
            .instrument(span)
            .await
            .with_duration_ms(phase_started.elapsed().as_secs_f64() * 1000.0);

            host.advance_phase(phase, outcome.status);
            host.append_log(if outcome.is_error() {
                LogEntry::error(&outcome.message)
            } else {
                LogEntry::output(&outcome.message)
            });
            phases.push(outcome);
        }

        let report = RunReport {
            command: command.to_string(),
            phases,
            workflow_run,
            duration_ms: started.elapsed().as_secs_f64() * 1000.0,
        };
        info!(
            succeeded = report.succeeded(),
            duration_ms = report.duration_ms,
            "Pipeline run finished"
        );
        report
    }

    async fn execute(
        &self,
        host: &dyn PipelineHost,
        phase: Phase,
        command: &str,
        workflow_run: &mut Option<WorkflowRun>,
    ) -> PhaseOutcome {
        match phase {
            Phase::Cli => {
                self.simulate(phase).await;
                PhaseOutcome::completed(phase, CLI_DONE)
            }
            Phase::Python => {
                self.simulate(phase).await;
                PhaseOutcome::completed(phase, PYTHON_DONE)
            }
            Phase::Perplexity => self.ask_completion_service(host, command).await,
            Phase::Github => {
                self.simulate(phase).await;
                let run = WorkflowRun::success();
                host.record_run(run.clone());
                *workflow_run = Some(run);
                PhaseOutcome::completed(phase, GITHUB_DONE)
            }
        }
    }

    async fn ask_completion_service(&self, host: &dyn PipelineHost, command: &str) -> PhaseOutcome {
        let phase = Phase::Perplexity;
        let Some(api_key) = host.api_key() else {
            self.simulate(phase).await;
            return PhaseOutcome::completed(phase, PERPLEXITY_SIMULATED);
        };
        let Some(service) = self.completion.as_ref() else {
            warn!("API key configured but no completion service attached; simulating");
            self.simulate(phase).await;
            return PhaseOutcome::completed(phase, PERPLEXITY_SIMULATED);
        };

        match service.complete(&api_key, &command_prompt(command)).await {
            Ok(response) => PhaseOutcome::completed(
                phase,
                format!("{AI_RESPONSE_PREFIX}{}", response.content),
            ),
            Err(err) => PhaseOutcome::failed(phase, PERPLEXITY_FAILED, err.to_string()),
        }
    }

    async fn simulate(&self, phase: Phase) {
        let delay = self.config.phase_delay(phase);
        if delay > Duration::ZERO {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::LogKind;
    use crate::errors::CompletionError;
    use crate::providers::{CompletionResponse, MockCompletionService};
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct RecordingHost {
        transitions: Mutex<Vec<(Phase, StageStatus)>>,
        log: Mutex<Vec<LogEntry>>,
        runs: Mutex<Vec<WorkflowRun>>,
        api_key: Option<String>,
    }

    impl RecordingHost {
        fn with_key(key: &str) -> Self {
            Self {
                api_key: Some(key.to_string()),
                ..Self::default()
            }
        }

        fn texts(&self) -> Vec<String> {
            self.log.lock().iter().map(|e| e.text.clone()).collect()
        }
    }

    impl PipelineHost for RecordingHost {
        fn advance_phase(&self, phase: Phase, status: StageStatus) {
            self.transitions.lock().push((phase, status));
        }

        fn append_log(&self, entry: LogEntry) {
            self.log.lock().push(entry);
        }

        fn record_run(&self, run: WorkflowRun) {
            self.runs.lock().push(run);
        }

        fn api_key(&self) -> Option<String> {
            self.api_key.clone()
        }
    }

    fn runner() -> WorkflowRunner {
        WorkflowRunner::new(PipelineConfig::instant())
    }

    #[tokio::test]
    async fn test_run_without_key_simulates_every_phase() {
        let host = RecordingHost::default();
        let report = runner().run(&host, "run deploy").await;

        assert!(report.succeeded());
        assert_eq!(
            host.texts(),
            vec![CLI_DONE, PYTHON_DONE, PERPLEXITY_SIMULATED, GITHUB_DONE]
        );
        assert_eq!(host.runs.lock().len(), 1);
        assert_eq!(report.workflow_run.as_ref(), host.runs.lock().first());
    }

    #[tokio::test]
    async fn test_phases_visited_in_order() {
        let host = RecordingHost::default();
        runner().run(&host, "run").await;

        let expected: Vec<_> = Phase::ALL
            .iter()
            .flat_map(|p| [(*p, StageStatus::Processing), (*p, StageStatus::Completed)])
            .collect();
        assert_eq!(*host.transitions.lock(), expected);
    }

    #[tokio::test]
    async fn test_key_without_service_is_simulated() {
        let host = RecordingHost::with_key("pplx-key");
        let report = runner().run(&host, "run x").await;
        assert_eq!(
            report.outcome(Phase::Perplexity).map(|o| o.message.as_str()),
            Some(PERPLEXITY_SIMULATED)
        );
    }

    #[tokio::test]
    async fn test_completion_reply_logged() {
        let mut mock = MockCompletionService::new();
        mock.expect_complete().times(1).returning(|key, prompt| {
            assert_eq!(key, "pplx-key");
            assert_eq!(prompt, command_prompt("run backup"));
            Ok(CompletionResponse::text("Schedule it nightly."))
        });

        let host = RecordingHost::with_key("pplx-key");
        let report = runner()
            .with_completion_service(Arc::new(mock))
            .run(&host, "run backup")
            .await;

        assert!(report.succeeded());
        assert_eq!(host.texts()[2], "AI Response: Schedule it nightly.");
    }

    #[tokio::test]
    async fn test_completion_failure_does_not_halt_pipeline() {
        let mut mock = MockCompletionService::new();
        mock.expect_complete()
            .times(1)
            .returning(|_, _| Err(CompletionError::Status { status: 500, body: "oops".into() }));

        let host = RecordingHost::with_key("pplx-key");
        let report = runner()
            .with_completion_service(Arc::new(mock))
            .run(&host, "run deploy")
            .await;

        assert_eq!(report.failed_phases(), vec![Phase::Perplexity]);
        assert!(host
            .transitions
            .lock()
            .contains(&(Phase::Perplexity, StageStatus::Error)));
        assert!(host
            .transitions
            .lock()
            .contains(&(Phase::Github, StageStatus::Completed)));

        let log = host.log.lock().clone();
        assert_eq!(log[2], LogEntry::error(PERPLEXITY_FAILED));
        assert_eq!(log[3].kind, LogKind::Output);
        assert_eq!(host.runs.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_no_call_without_key() {
        let mut mock = MockCompletionService::new();
        mock.expect_complete().times(0);

        let host = RecordingHost::default();
        let report = runner()
            .with_completion_service(Arc::new(mock))
            .run(&host, "run deploy")
            .await;
        assert!(report.succeeded());
    }

    #[tokio::test]
    async fn test_phase_durations_follow_config() {
        let config = PipelineConfig {
            cli_ms: 20,
            python_ms: 0,
            perplexity_ms: 0,
            github_ms: 0,
            ..PipelineConfig::default()
        };
        let host = RecordingHost::default();
        let report = WorkflowRunner::new(config).run(&host, "run").await;

        let cli = report.outcome(Phase::Cli).unwrap();
        assert!(cli.duration_ms >= 20.0);
        assert!(report.duration_ms >= cli.duration_ms);
    }
}
