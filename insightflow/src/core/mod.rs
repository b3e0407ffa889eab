//! Core domain status types shared across the crate.
//!
//! - Stage status for the automation pipeline
//! - Workflow run status for the CI history
//! - Meeting status and task priority for transcript processing

mod status;

pub use status::{MeetingStatus, Priority, RunStatus, StageStatus};
