//! Results of a pipeline run.

use crate::core::StageStatus;
use crate::history::WorkflowRun;
use crate::stages::Phase;
use serde::{Deserialize, Serialize};

/// Outcome of a single phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseOutcome {
    /// The phase.
    pub phase: Phase,
    /// Final status (`completed` or `error`).
    pub status: StageStatus,
    /// The log message written for the phase.
    pub message: String,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: f64,
    /// Underlying error, for failed phases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PhaseOutcome {
    /// Creates a completed outcome.
    #[must_use]
    pub fn completed(phase: Phase, message: impl Into<String>) -> Self {
        Self {
            phase,
            status: StageStatus::Completed,
            message: message.into(),
            duration_ms: 0.0,
            error: None,
        }
    }

    /// Creates a failed outcome.
    #[must_use]
    pub fn failed(phase: Phase, message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            phase,
            status: StageStatus::Error,
            message: message.into(),
            duration_ms: 0.0,
            error: Some(error.into()),
        }
    }

    /// Sets the duration.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Returns true if the phase failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == StageStatus::Error
    }
}

/// Result of a complete pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// The command that triggered the run.
    pub command: String,
    /// Per-phase outcomes, in execution order.
    pub phases: Vec<PhaseOutcome>,
    /// The workflow run recorded by the `github` phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_run: Option<WorkflowRun>,
    /// Total duration in milliseconds.
    pub duration_ms: f64,
}

impl RunReport {
    /// Returns true if every phase completed.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.phases.iter().all(|p| !p.is_error())
    }

    /// Returns the phases that ended in error.
    #[must_use]
    pub fn failed_phases(&self) -> Vec<Phase> {
        self.phases
            .iter()
            .filter(|p| p.is_error())
            .map(|p| p.phase)
            .collect()
    }

    /// Returns the outcome of one phase.
    #[must_use]
    pub fn outcome(&self, phase: Phase) -> Option<&PhaseOutcome> {
        self.phases.iter().find(|p| p.phase == phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(phases: Vec<PhaseOutcome>) -> RunReport {
        RunReport {
            command: "run x".into(),
            phases,
            workflow_run: None,
            duration_ms: 0.0,
        }
    }

    #[test]
    fn test_all_completed_succeeds() {
        let r = report(Phase::ALL.iter().map(|p| PhaseOutcome::completed(*p, "ok")).collect());
        assert!(r.succeeded());
        assert!(r.failed_phases().is_empty());
    }

    #[test]
    fn test_failed_phase_reported() {
        let r = report(vec![
            PhaseOutcome::completed(Phase::Cli, "ok"),
            PhaseOutcome::failed(Phase::Perplexity, "api error", "status 500"),
            PhaseOutcome::completed(Phase::Github, "ok"),
        ]);
        assert!(!r.succeeded());
        assert_eq!(r.failed_phases(), vec![Phase::Perplexity]);
        assert_eq!(
            r.outcome(Phase::Perplexity).and_then(|o| o.error.as_deref()),
            Some("status 500")
        );
        assert!(r.outcome(Phase::Python).is_none());
    }

    #[test]
    fn test_outcome_duration() {
        let outcome = PhaseOutcome::completed(Phase::Cli, "ok").with_duration_ms(12.5);
        assert!((outcome.duration_ms - 12.5).abs() < f64::EPSILON);
    }
}
