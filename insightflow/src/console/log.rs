//! Append-only terminal log with a retention limit.

use crate::commands::BANNER;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Default number of log entries retained.
pub const DEFAULT_LOG_RETENTION: usize = 1000;

/// The kind of a terminal log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    /// Echo of a typed command.
    Command,
    /// Normal output.
    Output,
    /// Error output.
    Error,
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command => write!(f, "command"),
            Self::Output => write!(f, "output"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single terminal log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Entry kind.
    pub kind: LogKind,
    /// Entry text; may span several lines.
    pub text: String,
}

impl LogEntry {
    /// Creates a log entry.
    #[must_use]
    pub fn new(kind: LogKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Creates a command echo.
    #[must_use]
    pub fn command(text: impl Into<String>) -> Self {
        Self::new(LogKind::Command, text)
    }

    /// Creates an output line.
    #[must_use]
    pub fn output(text: impl Into<String>) -> Self {
        Self::new(LogKind::Output, text)
    }

    /// Creates an error line.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(LogKind::Error, text)
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LogKind::Command => write!(f, "$ {}", self.text),
            LogKind::Output => f.write_str(&self.text),
            LogKind::Error => write!(f, "! {}", self.text),
        }
    }
}

/// Ordered terminal log.
///
/// With a retention limit the oldest entries are dropped first.
#[derive(Debug, Clone)]
pub struct TerminalLog {
    entries: VecDeque<LogEntry>,
    max_entries: Option<usize>,
}

impl Default for TerminalLog {
    fn default() -> Self {
        Self::new(Some(DEFAULT_LOG_RETENTION))
    }
}

impl TerminalLog {
    /// Creates a log holding the startup banner.
    ///
    /// `max_entries` of `None` keeps every entry.
    #[must_use]
    pub fn new(max_entries: Option<usize>) -> Self {
        let mut log = Self {
            entries: VecDeque::new(),
            max_entries: max_entries.map(|m| m.max(BANNER.len())),
        };
        log.reset_to_banner();
        log
    }

    /// Discards every entry and writes the two banner lines.
    pub fn reset_to_banner(&mut self) {
        self.entries.clear();
        self.entries
            .extend(BANNER.iter().map(|line| LogEntry::output(*line)));
    }

    /// Appends an entry, evicting the oldest if over the limit.
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_back(entry);
        if let Some(max) = self.max_entries {
            while self.entries.len() > max {
                self.entries.pop_front();
            }
        }
    }

    /// Returns the entries in order.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Iterates entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Returns the last entry.
    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Returns the retention limit.
    #[must_use]
    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
