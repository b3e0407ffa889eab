//! Command interpretation for the pipeline terminal.

mod interpreter;

pub use interpreter::{format_status_line, Command, BANNER, HELP_TEXT};
