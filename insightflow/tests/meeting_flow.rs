//! End-to-end behaviour of the meeting workspace.

use std::sync::Arc;

use insightflow::core::{MeetingStatus, Priority};
use insightflow::errors::{CompletionError, InsightflowError};
use insightflow::events::CollectingNotificationSink;
use insightflow::config::ProcessingConfig;
use insightflow::meetings::{
    export_meeting, read_transcript_file, render_export, CompletionTranscriptProcessor,
    MeetingWorkspace, TaskUpdate,
};
use insightflow::testing::{
    instant_workspace, sample_meeting, FailingTranscriptProcessor, ScriptedCompletionService,
    SAMPLE_TRANSCRIPT,
};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn upload_then_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Quarterly Planning.txt");
    std::fs::write(&path, SAMPLE_TRANSCRIPT).unwrap();

    let file = read_transcript_file(&path).await.unwrap();
    assert_eq!(file.title, "Quarterly Planning");

    let ws = instant_workspace();
    let meeting = ws.upload(&file.transcript, &file.title).await.unwrap();
    assert_eq!(meeting.status, MeetingStatus::Completed);
    assert!(meeting
        .summary
        .as_deref()
        .unwrap()
        .starts_with("Key Discussion Points: Alice opened the quarterly planning session. "));

    let written = export_meeting(&meeting, dir.path()).await.unwrap();
    assert_eq!(
        written.file_name().unwrap().to_string_lossy(),
        "Quarterly_Planning_summary.txt"
    );
    let text = std::fs::read_to_string(written).unwrap();
    assert!(text.starts_with("Meeting: Quarterly Planning\n"));
    assert!(text.contains("- Follow up on project timeline discussion (Priority: high)"));
}

#[test]
fn export_contains_task_line() {
    let meeting = sample_meeting("Sync", &[("A", Priority::High)]);
    let text = render_export(&meeting);
    assert!(text.lines().any(|line| line == "- A (Priority: high)"));
}

#[tokio::test]
async fn unknown_task_update_leaves_tasks_unchanged() {
    let ws = instant_workspace();
    let meeting = ws.upload(SAMPLE_TRANSCRIPT, "Planning").await.unwrap();

    assert!(!ws.update_task(&meeting.id, "missing", &TaskUpdate::new().completed(true)));
    assert_eq!(ws.get(&meeting.id).unwrap().tasks(), meeting.tasks());
}

#[tokio::test]
async fn task_edits_and_additions() {
    let ws = instant_workspace();
    let meeting = ws.upload(SAMPLE_TRANSCRIPT, "Planning").await.unwrap();
    let first = meeting.tasks()[0].id.clone();

    assert!(ws.update_task(
        &meeting.id,
        &first,
        &TaskUpdate::new().description("Publish timeline").assignee("dana"),
    ));
    ws.add_task(&meeting.id, "Reserve demo slot").unwrap();

    let stored = ws.get(&meeting.id).unwrap();
    assert_eq!(stored.tasks()[0].description, "Publish timeline");
    assert_eq!(stored.tasks()[0].assignee.as_deref(), Some("dana"));
    assert_eq!(stored.tasks().len(), 4);
    assert_eq!(stored.pending_count(), 4);
    assert!(render_export(&stored).contains("- Publish timeline (Priority: high) - Assigned to: dana"));
}

#[tokio::test]
async fn failing_processor_marks_error_and_notifies() {
    let sink = Arc::new(CollectingNotificationSink::new());
    let ws = MeetingWorkspace::new(
        Arc::new(FailingTranscriptProcessor::default()),
        ProcessingConfig::instant(),
    )
    .with_notifier(sink.clone());

    let meeting = ws.upload(SAMPLE_TRANSCRIPT, "Broken").await.unwrap();
    assert_eq!(meeting.status, MeetingStatus::Error);
    assert_eq!(ws.selected().unwrap().status, MeetingStatus::Error);
    assert_eq!(sink.last().unwrap().title, "Processing Failed");
}

#[tokio::test]
async fn completion_backed_processing() {
    let service = Arc::new(
        ScriptedCompletionService::new(r#"[{"description": "Send recap", "priority": "high", "assignee": "lee"}]"#)
            .with_reply("Launch slips two weeks; reporting is cut."),
    );
    let processor = CompletionTranscriptProcessor::new(service.clone(), "pplx");
    let ws = MeetingWorkspace::new(Arc::new(processor), ProcessingConfig::instant());

    let meeting = ws.upload(SAMPLE_TRANSCRIPT, "Planning").await.unwrap();

    assert_eq!(meeting.status, MeetingStatus::Completed);
    assert_eq!(service.call_count(), 2);
    let tasks = meeting.tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].description, "Send recap");
    assert_eq!(tasks[0].priority, Priority::High);
}

#[tokio::test]
async fn completion_outage_fails_meeting() {
    let service = Arc::new(
        ScriptedCompletionService::new("[]")
            .with_error(CompletionError::Transport("connection reset".into())),
    );
    let ws = MeetingWorkspace::new(
        Arc::new(CompletionTranscriptProcessor::new(service, "pplx")),
        ProcessingConfig::instant(),
    );

    let meeting = ws.upload(SAMPLE_TRANSCRIPT, "Planning").await.unwrap();
    assert_eq!(meeting.status, MeetingStatus::Error);
}

#[tokio::test]
async fn blank_upload_is_rejected() {
    let ws = instant_workspace();
    assert!(matches!(
        ws.upload("", "Title").await,
        Err(InsightflowError::Upload(_))
    ));
    assert!(ws.meetings().is_empty());
}
