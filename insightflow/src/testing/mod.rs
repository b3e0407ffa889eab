//! Testing utilities.
//!
//! This module provides:
//! - Scripted and failing collaborators
//! - Sample transcripts and instant-timing setups
//! - Assertions over console state

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::{assert_all_stages, assert_log_contains, assert_log_tail, assert_stage};
pub use fixtures::{instant_console, instant_workspace, sample_meeting, SAMPLE_TRANSCRIPT};
pub use mocks::{FailingCompletionService, FailingTranscriptProcessor, ScriptedCompletionService};
