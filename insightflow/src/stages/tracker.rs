//! Ordered stage list with per-stage status.

use super::Phase;
use crate::core::StageStatus;
use crate::errors::InsightflowError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single named stage shown in the pipeline view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageInfo {
    /// Unique stage id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Optional description for the detail panel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Current status.
    #[serde(default)]
    pub status: StageStatus,
}

impl StageInfo {
    /// Creates an idle stage.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status: StageStatus::Idle,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<Phase> for StageInfo {
    fn from(phase: Phase) -> Self {
        Self::new(phase.id(), phase.title()).with_description(phase.description())
    }
}

/// Holds a fixed, ordered set of stages and their statuses.
///
/// Membership never changes after construction; only statuses move. The
/// "current" stage is derived from status (the first `processing` stage)
/// rather than tracked separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageTracker {
    stages: Vec<StageInfo>,
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::pipeline()
    }
}

impl StageTracker {
    /// Creates a tracker from an explicit stage list.
    ///
    /// # Errors
    ///
    /// Returns `InsightflowError::DuplicateStage` if two stages share an id.
    pub fn new(stages: Vec<StageInfo>) -> Result<Self, InsightflowError> {
        let mut seen = HashSet::new();
        for stage in &stages {
            if !seen.insert(stage.id.as_str()) {
                return Err(InsightflowError::DuplicateStage(stage.id.clone()));
            }
        }
        Ok(Self { stages })
    }

    /// Creates the standard four-phase automation pipeline, all idle.
    #[must_use]
    pub fn pipeline() -> Self {
        Self {
            stages: Phase::ALL.into_iter().map(StageInfo::from).collect(),
        }
    }

    /// Replaces the status of the stage with `id`.
    ///
    /// Returns `false` and changes nothing when no stage has that id.
    pub fn set_status(&mut self, id: &str, status: StageStatus) -> bool {
        match self.stages.iter_mut().find(|s| s.id == id) {
            Some(stage) => {
                stage.status = status;
                true
            }
            None => {
                tracing::debug!(stage_id = %id, "Ignoring status update for unknown stage");
                false
            }
        }
    }

    /// Returns the status of a stage.
    #[must_use]
    pub fn status(&self, id: &str) -> Option<StageStatus> {
        self.get(id).map(|s| s.status)
    }

    /// Returns a stage by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&StageInfo> {
        self.stages.iter().find(|s| s.id == id)
    }

    /// Returns the stage currently processing, if any.
    #[must_use]
    pub fn active_stage(&self) -> Option<&StageInfo> {
        self.stages.iter().find(|s| s.status.is_active())
    }

    /// Returns true if any stage is processing.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.active_stage().is_some()
    }

    /// Sets every stage back to idle.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.status = StageStatus::Idle;
        }
    }

    /// Iterates stages in order.
    pub fn iter(&self) -> impl Iterator<Item = &StageInfo> {
        self.stages.iter()
    }

    /// Returns the stages as a slice.
    #[must_use]
    pub fn stages(&self) -> &[StageInfo] {
        &self.stages
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the tracker has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_stages_idle() {
        let tracker = StageTracker::pipeline();
        assert_eq!(tracker.len(), 4);
        assert!(tracker.iter().all(|s| s.status == StageStatus::Idle));
        assert!(tracker.active_stage().is_none());
        assert_eq!(tracker.get("perplexity").unwrap().title, "Perplexity API");
    }

    #[test]
    fn test_set_status_updates_only_target() {
        let mut tracker = StageTracker::pipeline();
        assert!(tracker.set_status("python", StageStatus::Processing));

        assert_eq!(tracker.status("python"), Some(StageStatus::Processing));
        assert_eq!(tracker.status("cli"), Some(StageStatus::Idle));
        assert_eq!(tracker.status("github"), Some(StageStatus::Idle));
    }

    #[test]
    fn test_set_status_unknown_id_is_noop() {
        let mut tracker = StageTracker::pipeline();
        let before = tracker.clone();

        assert!(!tracker.set_status("deploy", StageStatus::Error));
        assert_eq!(tracker.stages(), before.stages());
    }

    #[test]
    fn test_active_stage_is_derived() {
        let mut tracker = StageTracker::pipeline();
        tracker.set_status("cli", StageStatus::Completed);
        tracker.set_status("python", StageStatus::Processing);

        assert_eq!(tracker.active_stage().map(|s| s.id.as_str()), Some("python"));
        assert!(tracker.is_processing());

        tracker.set_status("python", StageStatus::Completed);
        assert!(!tracker.is_processing());
    }

    #[test]
    fn test_reset() {
        let mut tracker = StageTracker::pipeline();
        tracker.set_status("cli", StageStatus::Completed);
        tracker.set_status("perplexity", StageStatus::Error);
        tracker.reset();
        assert!(tracker.iter().all(|s| s.status == StageStatus::Idle));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = StageTracker::new(vec![
            StageInfo::new("build", "Build"),
            StageInfo::new("build", "Build again"),
        ]);
        assert!(matches!(result, Err(InsightflowError::DuplicateStage(id)) if id == "build"));
    }

    #[test]
    fn test_custom_stages() {
        let tracker = StageTracker::new(vec![
            StageInfo::new("a", "A").with_description("first"),
            StageInfo::new("b", "B"),
        ])
        .unwrap();
        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.get("a").unwrap().description.as_deref(), Some("first"));
    }
}
