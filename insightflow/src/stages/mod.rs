//! Pipeline stages.
//!
//! Stages are the fixed, ordered steps shown in the automation pipeline.
//! The tracker owns their statuses; the runner drives them.

mod phase;
mod tracker;

pub use phase::Phase;
pub use tracker::{StageInfo, StageTracker};
