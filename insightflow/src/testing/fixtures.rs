//! Ready-made inputs and instant-timing setups.

use std::sync::Arc;

use crate::config::{PipelineConfig, ProcessingConfig};
use crate::console::AutomationConsole;
use crate::core::Priority;
use crate::meetings::{HeuristicProcessor, Meeting, MeetingWorkspace, Task};

/// A short transcript with four sentences.
pub const SAMPLE_TRANSCRIPT: &str = "Alice opened the quarterly planning session. \
Bob reported the launch is two weeks behind. \
The team agreed to cut the reporting feature. \
Carol will circulate revised estimates by Friday.";

/// A console with no simulated delays.
#[must_use]
pub fn instant_console() -> AutomationConsole {
    AutomationConsole::new(PipelineConfig::instant())
}

/// A meeting workspace using the heuristic processor with no delays.
#[must_use]
pub fn instant_workspace() -> MeetingWorkspace {
    let config = ProcessingConfig::instant();
    MeetingWorkspace::new(Arc::new(HeuristicProcessor::new(config.clone())), config)
}

/// A completed meeting carrying the given `(description, priority)` tasks.
#[must_use]
pub fn sample_meeting(title: &str, tasks: &[(&str, Priority)]) -> Meeting {
    let mut meeting = Meeting::new(title, SAMPLE_TRANSCRIPT);
    meeting.complete(
        "Planning slipped two weeks.".to_string(),
        tasks
            .iter()
            .map(|(description, priority)| Task::new(*description, *priority))
            .collect(),
    );
    meeting
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MeetingStatus;

    #[test]
    fn test_sample_meeting() {
        let meeting = sample_meeting("Plan", &[("A", Priority::High)]);
        assert_eq!(meeting.status, MeetingStatus::Completed);
        assert_eq!(meeting.tasks().len(), 1);
        assert_eq!(meeting.word_count(), 29);
    }

    #[test]
    fn test_instant_console_is_idle() {
        assert!(!instant_console().is_processing());
        assert!(!instant_workspace().is_processing());
    }
}
