//! Record of a completed pipeline execution.

use super::Identified;
use crate::core::RunStatus;
use crate::utils::{self, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to workflow runs produced by the pipeline.
pub const WORKFLOW_NAME: &str = "Automated CLI Workflow";

/// Branch label attached to workflow runs.
pub const DEFAULT_BRANCH: &str = "main";

/// One CI workflow run shown in the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRun {
    /// Time-ordered unique id.
    pub id: String,
    /// Workflow name.
    pub name: String,
    /// Run status.
    pub status: RunStatus,
    /// When the run was recorded.
    pub timestamp: Timestamp,
    /// Branch label.
    pub branch: String,
    /// Short commit-like token.
    pub commit: String,
}

impl WorkflowRun {
    /// Creates a successful run on the default branch with a random commit token.
    #[must_use]
    pub fn success() -> Self {
        Self {
            id: utils::generate_id(),
            name: WORKFLOW_NAME.to_string(),
            status: RunStatus::Success,
            timestamp: utils::now_utc(),
            branch: DEFAULT_BRANCH.to_string(),
            commit: utils::commit_token(),
        }
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: RunStatus) -> Self {
        self.status = status;
        self
    }
}

impl Identified for WorkflowRun {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for WorkflowRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} \u{2022} {} \u{2022} {}",
            self.name,
            self.status,
            self.branch,
            self.commit,
            utils::format_time(&self.timestamp)
        )
    }
}
