//! Meeting and task records.

use crate::core::{MeetingStatus, Priority};
use crate::history::Identified;
use crate::utils::{generate_id, now_utc, Timestamp};
use serde::{Deserialize, Serialize};

/// An action item extracted from (or added to) a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique within its meeting.
    pub id: String,
    /// What needs doing.
    pub description: String,
    /// Who is doing it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Priority.
    #[serde(default)]
    pub priority: Priority,
    /// Free-form due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Whether the task is done.
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates an open task with a fresh id.
    #[must_use]
    pub fn new(description: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: generate_id(),
            description: description.into(),
            assignee: None,
            priority,
            due_date: None,
            completed: false,
        }
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Merges the fields present in `update`.
    pub fn apply(&mut self, update: &TaskUpdate) {
        if let Some(description) = &update.description {
            self.description.clone_from(description);
        }
        if let Some(assignee) = &update.assignee {
            self.assignee = Some(assignee.clone());
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(due_date) = &update.due_date {
            self.due_date = Some(due_date.clone());
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
    }
}

/// A partial set of task fields. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New assignee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// New completion flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// An uploaded transcript and what was learned from it.
///
/// `summary` and `tasks` are populated together when processing completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    /// Unique, time-ordered id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Raw transcript text.
    pub transcript: String,
    /// Summary, once processed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Action items, once processed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
    /// Upload time.
    pub timestamp: Timestamp,
    /// Processing status.
    pub status: MeetingStatus,
}

impl Meeting {
    /// Creates a meeting in `processing`.
    #[must_use]
    pub fn new(title: impl Into<String>, transcript: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            transcript: transcript.into(),
            summary: None,
            tasks: None,
            timestamp: now_utc(),
            status: MeetingStatus::Processing,
        }
    }

    /// Stores the processing results and marks the meeting completed.
    pub fn complete(&mut self, summary: String, tasks: Vec<Task>) {
        self.summary = Some(summary);
        self.tasks = Some(tasks);
        self.status = MeetingStatus::Completed;
    }

    /// Marks the meeting failed, discarding any partial results.
    pub fn fail(&mut self) {
        self.summary = None;
        self.tasks = None;
        self.status = MeetingStatus::Error;
    }

    /// Returns the tasks, or an empty slice before processing.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.tasks.as_deref().unwrap_or_default()
    }

    /// Merges `update` into the task with `task_id`.
    ///
    /// Returns false, leaving every task untouched, if no task matches.
    pub fn update_task(&mut self, task_id: &str, update: &TaskUpdate) -> bool {
        let Some(task) = self
            .tasks
            .as_mut()
            .and_then(|tasks| tasks.iter_mut().find(|t| t.id == task_id))
        else {
            return false;
        };
        task.apply(update);
        true
    }

    /// Appends a task, creating the list if needed.
    pub fn push_task(&mut self, task: Task) {
        self.tasks.get_or_insert_with(Vec::new).push(task);
    }

    /// Number of tasks not yet completed.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.tasks().iter().filter(|t| !t.completed).count()
    }

    /// Number of completed tasks.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks().iter().filter(|t| t.completed).count()
    }

    /// Transcript length in space-separated words.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.transcript.split(' ').count()
    }
}

impl Identified for Meeting {
    fn id(&self) -> &str {
        &self.id
    }
}
