//! In-memory, newest-first history of completed work items.

mod run;
mod store;

pub use run::{WorkflowRun, DEFAULT_BRANCH, WORKFLOW_NAME};
pub use store::{HistoryStore, Identified, DEFAULT_RUN_HISTORY};
