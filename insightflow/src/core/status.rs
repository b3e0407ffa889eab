//! Status enums for stages, workflow runs and meetings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The display status of a pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Stage has not started in the current run.
    Idle,
    /// Stage is currently doing its work.
    Processing,
    /// Stage finished successfully.
    Completed,
    /// Stage finished with an error.
    Error,
}

impl Default for StageStatus {
    fn default() -> Self {
        Self::Idle
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl StageStatus {
    /// Returns true if the stage has finished, successfully or not.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }

    /// Returns true if the stage is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Processing)
    }

    /// Badge label used by front-ends.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Pending",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::Error => "Error",
        }
    }
}

/// The status of a recorded workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Run is queued.
    Pending,
    /// Run is executing.
    Running,
    /// Run finished successfully.
    Success,
    /// Run failed.
    Failure,
}

impl Default for RunStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// The processing status of a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    /// Transcript is being analysed.
    Processing,
    /// Summary and tasks are available.
    Completed,
    /// Analysis failed.
    Error,
}

impl Default for MeetingStatus {
    fn default() -> Self {
        Self::Processing
    }
}

impl fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Priority of an action item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_status_display() {
        assert_eq!(StageStatus::Idle.to_string(), "idle");
        assert_eq!(StageStatus::Processing.to_string(), "processing");
        assert_eq!(StageStatus::Completed.to_string(), "completed");
        assert_eq!(StageStatus::Error.to_string(), "error");
    }

    #[test]
    fn test_stage_status_is_terminal() {
        assert!(StageStatus::Completed.is_terminal());
        assert!(StageStatus::Error.is_terminal());
        assert!(!StageStatus::Idle.is_terminal());
        assert!(!StageStatus::Processing.is_terminal());
    }

    #[test]
    fn test_stage_status_label() {
        assert_eq!(StageStatus::Idle.label(), "Pending");
        assert_eq!(StageStatus::Error.label(), "Error");
    }

    #[test]
    fn test_run_status_serialize() {
        let json = serde_json::to_string(&RunStatus::Success).unwrap();
        assert_eq!(json, r#""success""#);

        let deserialized: RunStatus = serde_json::from_str(r#""failure""#).unwrap();
        assert_eq!(deserialized, RunStatus::Failure);
    }

    #[test]
    fn test_meeting_status_default() {
        assert_eq!(MeetingStatus::default(), MeetingStatus::Processing);
        assert_eq!(MeetingStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_priority_parse_and_order() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!(" low ".parse::<Priority>(), Ok(Priority::Low));
        assert!("urgent".parse::<Priority>().is_err());
        assert!(Priority::High > Priority::Medium);
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(Priority::High.to_string(), "high");
    }
}
