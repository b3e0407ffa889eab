//! Plain-text meeting export.

use super::model::{Meeting, Task};
use crate::errors::Result;
use crate::utils::format_date;
use regex::Regex;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::info;

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]").expect("filename pattern is valid"));

/// Shown in place of a summary that has not been generated yet.
pub const SUMMARY_PLACEHOLDER: &str = "Processing...";
/// Shown in place of an empty task list.
pub const NO_TASKS: &str = "No tasks extracted yet";

fn task_line(task: &Task) -> String {
    let mut line = format!("- {} (Priority: {})", task.description, task.priority);
    if let Some(assignee) = task.assignee.as_deref().filter(|a| !a.is_empty()) {
        let _ = write!(line, " - Assigned to: {assignee}");
    }
    line
}

/// Renders a meeting as a plain-text report.
#[must_use]
pub fn render_export(meeting: &Meeting) -> String {
    let tasks = if meeting.tasks().is_empty() {
        NO_TASKS.to_string()
    } else {
        meeting
            .tasks()
            .iter()
            .map(task_line)
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Meeting: {title}\nDate: {date}\n\nSUMMARY:\n{summary}\n\nTRANSCRIPT:\n{transcript}\n\nTASKS:\n{tasks}\n",
        title = meeting.title,
        date = format_date(&meeting.timestamp),
        summary = meeting
            .summary
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(SUMMARY_PLACEHOLDER),
        transcript = meeting.transcript,
    )
}

/// File name for an exported meeting.
///
/// ```
/// use insightflow::meetings::export_filename;
///
/// assert_eq!(export_filename("Q3 Review: Plan"), "Q3_Review__Plan_summary.txt");
/// ```
#[must_use]
pub fn export_filename(title: &str) -> String {
    format!("{}_summary.txt", UNSAFE_FILENAME_CHARS.replace_all(title, "_"))
}

/// Writes the export of `meeting` into `dir`, creating it if needed.
///
/// Returns the path written.
///
/// # Errors
///
/// Returns an IO error if the directory or file cannot be written.
pub async fn export_meeting(meeting: &Meeting, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;

    let path = dir.join(export_filename(&meeting.title));
    tokio::fs::write(&path, render_export(meeting)).await?;

    info!(meeting_id = %meeting.id, path = %path.display(), "Meeting exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Priority;
    use pretty_assertions::assert_eq;

    fn meeting() -> Meeting {
        let mut meeting = Meeting::new("Design Sync", "We met.");
        meeting.complete(
            "Short.".into(),
            vec![
                Task::new("A", Priority::High),
                Task::new("B", Priority::Low).with_assignee("kim"),
            ],
        );
        meeting
    }

    #[test]
    fn test_render_export() {
        let meeting = meeting();
        let expected = format!(
            "Meeting: Design Sync\nDate: {}\n\nSUMMARY:\nShort.\n\nTRANSCRIPT:\nWe met.\n\nTASKS:\n- A (Priority: high)\n- B (Priority: low) - Assigned to: kim\n",
            format_date(&meeting.timestamp)
        );
        assert_eq!(render_export(&meeting), expected);
    }

    #[test]
    fn test_render_unprocessed_meeting() {
        let text = render_export(&Meeting::new("Raw", "text"));
        assert!(text.contains("SUMMARY:\nProcessing...\n"));
        assert!(text.contains("TASKS:\nNo tasks extracted yet\n"));
    }

    #[test]
    fn test_render_empty_task_list() {
        let mut meeting = Meeting::new("Raw", "text");
        meeting.complete("s".into(), Vec::new());
        assert!(render_export(&meeting).contains("TASKS:\nNo tasks extracted yet"));
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("Design Sync"), "Design_Sync_summary.txt");
        assert_eq!(export_filename("réunion"), "r_union_summary.txt");
    }

    #[tokio::test]
    async fn test_export_meeting_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let meeting = meeting();

        let path = export_meeting(&meeting, dir.path().join("out")).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "Design_Sync_summary.txt");

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_export(&meeting));
    }
}
