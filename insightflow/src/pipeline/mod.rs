//! The automation pipeline.
//!
//! A run drives the fixed phases `cli`, `python`, `perplexity`, `github` in
//! order, reporting each transition to a [`PipelineHost`].

mod host;
mod report;
mod runner;

pub use host::PipelineHost;
pub use report::{PhaseOutcome, RunReport};
pub use runner::{
    WorkflowRunner, AI_RESPONSE_PREFIX, CLI_DONE, GITHUB_DONE, PERPLEXITY_FAILED,
    PERPLEXITY_SIMULATED, PYTHON_DONE,
};
