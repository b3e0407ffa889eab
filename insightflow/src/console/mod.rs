//! The terminal console: command echo, log, stage view and run history.

mod log;
mod terminal;

pub use log::{LogEntry, LogKind, TerminalLog, DEFAULT_LOG_RETENTION};
pub use terminal::{AutomationConsole, CommandOutcome, ConsoleSnapshot, LogEvent, ALREADY_RUNNING};
