//! Meeting workspace: upload, processing and task editing.

use super::model::{Meeting, Task, TaskUpdate};
use super::processor::{HeuristicProcessor, TranscriptProcessor};
use crate::config::ProcessingConfig;
use crate::core::{MeetingStatus, Priority};
use crate::errors::{InsightflowError, ProcessingError, Result, UploadError};
use crate::events::{NoOpNotificationSink, Notification, NotificationSink};
use crate::history::HistoryStore;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, info_span, warn, Instrument};

/// Error returned when an upload arrives while another is processing.
pub const ALREADY_PROCESSING: &str = "A transcript is already being processed";

#[derive(Debug, Default)]
struct WorkspaceState {
    meetings: HistoryStore<Meeting>,
    processing: bool,
}

/// Releases the workspace if an upload's future is dropped mid-processing.
///
/// While armed, dropping it clears the busy flag and fails the meeting.
struct ProcessingGuard<'a> {
    state: &'a Mutex<WorkspaceState>,
    meeting_id: &'a str,
    armed: bool,
}

impl ProcessingGuard<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock();
        state.processing = false;
        state.meetings.update(self.meeting_id, Meeting::fail);
        warn!(meeting_id = %self.meeting_id, "Transcript processing cancelled");
    }
}

/// Holds every uploaded meeting, newest first, and the current selection.
///
/// One transcript is processed at a time. Processing failures are recorded on
/// the meeting and reported through the notifier; they are not returned as
/// errors.
pub struct MeetingWorkspace {
    state: Mutex<WorkspaceState>,
    processor: Arc<dyn TranscriptProcessor>,
    notifier: Arc<dyn NotificationSink>,
    config: ProcessingConfig,
}

impl std::fmt::Debug for MeetingWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeetingWorkspace")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for MeetingWorkspace {
    fn default() -> Self {
        let config = ProcessingConfig::default();
        Self::new(Arc::new(HeuristicProcessor::new(config.clone())), config)
    }
}

impl MeetingWorkspace {
    /// Creates an empty workspace.
    #[must_use]
    pub fn new(processor: Arc<dyn TranscriptProcessor>, config: ProcessingConfig) -> Self {
        Self {
            state: Mutex::new(WorkspaceState::default()),
            processor,
            notifier: Arc::new(NoOpNotificationSink),
            config,
        }
    }

    /// Sets the notification sink.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Uploads a transcript and processes it to completion.
    ///
    /// The new meeting is inserted at the front and selected before
    /// processing starts. Returns the meeting in its final state.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError`] for a blank transcript or title, and
    /// [`InsightflowError::Busy`] if another upload is processing.
    pub async fn upload(&self, transcript: &str, title: &str) -> Result<Meeting> {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Err(UploadError::EmptyTranscript.into());
        }
        let title = title.trim();
        if title.is_empty() {
            return Err(UploadError::EmptyTitle.into());
        }

        let meeting = Meeting::new(title, transcript);
        let meeting_id = meeting.id.clone();
        {
            let mut state = self.state.lock();
            if state.processing {
                return Err(InsightflowError::Busy(ALREADY_PROCESSING.to_string()));
            }
            state.processing = true;
            state.meetings.append(meeting);
            state.meetings.select(&meeting_id);
        }
        let mut guard = ProcessingGuard {
            state: &self.state,
            meeting_id: &meeting_id,
            armed: true,
        };

        let span = info_span!("meeting", meeting_id = %meeting_id, title = %title);
        let started = Instant::now();
        let outcome = self.process(transcript).instrument(span.clone()).await;

        let finished = {
            let mut state = self.state.lock();
            state.processing = false;
            guard.disarm();
            state.meetings.update(&meeting_id, |m| match outcome {
                Ok((summary, tasks)) => m.complete(summary, tasks),
                Err(ref err) => {
                    warn!(parent: &span, error = %err, "Transcript processing failed");
                    m.fail();
                }
            });
            state
                .meetings
                .get(&meeting_id)
                .cloned()
                .ok_or_else(|| InsightflowError::NotFound(meeting_id.clone()))?
        };

        let notification = if finished.status == MeetingStatus::Completed {
            info!(
                parent: &span,
                tasks = finished.tasks().len(),
                duration_ms = started.elapsed().as_secs_f64() * 1000.0,
                "Transcript processed"
            );
            Notification::info(
                "Processing Complete",
                "Meeting transcript has been analyzed successfully",
            )
        } else {
            Notification::failure("Processing Failed", "Failed to analyze the meeting transcript")
        };
        self.notifier.notify(notification).await;

        Ok(finished)
    }

    async fn process(
        &self,
        transcript: &str,
    ) -> std::result::Result<(String, Vec<Task>), ProcessingError> {
        let delay = self.config.analysis_delay();
        if delay > Duration::ZERO {
            tokio::time::sleep(delay).await;
        }
        tokio::try_join!(
            self.processor.summarize(transcript),
            self.processor.extract_tasks(transcript),
        )
    }

    /// Returns true while an upload is processing.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.state.lock().processing
    }

    /// Returns every meeting, newest first.
    #[must_use]
    pub fn meetings(&self) -> Vec<Meeting> {
        self.state.lock().meetings.iter().cloned().collect()
    }

    /// Returns a meeting by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Meeting> {
        self.state.lock().meetings.get(id).cloned()
    }

    /// Selects a meeting. Returns false for unknown ids.
    pub fn select(&self, id: &str) -> bool {
        self.state.lock().meetings.select(id)
    }

    /// Returns the selected meeting.
    #[must_use]
    pub fn selected(&self) -> Option<Meeting> {
        self.state.lock().meetings.selected().cloned()
    }

    /// Merges `update` into one task of one meeting.
    ///
    /// Returns false, changing nothing, if either id is unknown.
    pub fn update_task(&self, meeting_id: &str, task_id: &str, update: &TaskUpdate) -> bool {
        let mut updated = false;
        self.state.lock().meetings.update(meeting_id, |m| {
            updated = m.update_task(task_id, update);
        });
        updated
    }

    /// Appends a medium-priority open task to a meeting.
    ///
    /// Returns `None` for an unknown meeting or a blank description.
    pub fn add_task(&self, meeting_id: &str, description: &str) -> Option<Task> {
        let description = description.trim();
        if description.is_empty() {
            return None;
        }
        let task = Task::new(description, Priority::Medium);
        let added = self
            .state
            .lock()
            .meetings
            .update(meeting_id, |m| m.push_task(task.clone()));
        added.then_some(task)
    }
}
