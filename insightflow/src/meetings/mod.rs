//! Meeting transcripts: upload, summary, action items and export.
//!
//! A [`MeetingWorkspace`] keeps every uploaded [`Meeting`] newest first and
//! runs a [`TranscriptProcessor`] over each new transcript.

mod export;
mod model;
mod processor;
mod upload;
mod workspace;

pub use export::{export_filename, export_meeting, render_export, NO_TASKS, SUMMARY_PLACEHOLDER};
pub use model::{Meeting, Task, TaskUpdate};
#[cfg(test)]
pub use processor::MockTranscriptProcessor;
pub use processor::{
    canned_tasks, heuristic_summary, parse_task_list, CompletionTranscriptProcessor,
    HeuristicProcessor, TranscriptProcessor, SUMMARY_TAIL,
};
pub use upload::{read_transcript_file, title_from_file_name, TranscriptFile};
pub use workspace::{MeetingWorkspace, ALREADY_PROCESSING};
