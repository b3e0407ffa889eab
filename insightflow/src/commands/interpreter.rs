//! Maps a typed line to one of the recognised terminal actions.

use serde::{Deserialize, Serialize};

/// The two lines shown when the terminal starts or is cleared.
pub const BANNER: [&str; 2] = [
    "Automation Pipeline CLI v1.0",
    "Type \"help\" for available commands",
];

/// Response to the `help` command.
pub const HELP_TEXT: &str = "Available commands:
  help           - Show this help message
  status         - Show pipeline status
  clear          - Clear the terminal
  run <command>  - Run the automation pipeline with a command";

/// A classified terminal command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "input", rename_all = "snake_case")]
pub enum Command {
    /// Show the help text.
    Help,
    /// Report pipeline status.
    Status,
    /// Reset the log to the banner.
    Clear,
    /// Run the pipeline; carries the full original command.
    Run(String),
    /// Anything else; carries the original input.
    Unknown(String),
}

impl Command {
    /// Classifies a line of input.
    ///
    /// Matching is case-insensitive on the trimmed line. `help`, `status` and
    /// `clear` must match exactly; anything starting with `run` is a run.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let lowered = trimmed.to_lowercase();

        match lowered.as_str() {
            "help" => Self::Help,
            "status" => Self::Status,
            "clear" => Self::Clear,
            _ if lowered.starts_with("run") => Self::Run(trimmed.to_string()),
            _ => Self::Unknown(trimmed.to_string()),
        }
    }

    /// Returns the not-found message for an unknown command.
    #[must_use]
    pub fn not_found_message(original: &str) -> String {
        format!("Command not found: {original}. Type \"help\" for available commands.")
    }

    /// Returns true for the `run` action.
    #[must_use]
    pub fn is_run(&self) -> bool {
        matches!(self, Self::Run(_))
    }
}

/// Formats the response to the `status` command.
#[must_use]
pub fn format_status_line(running: bool, workflow_runs: usize, api_configured: bool) -> String {
    format!(
        "Pipeline: {} | Workflow runs: {} | API key configured: {}",
        if running { "Running" } else { "Idle" },
        workflow_runs,
        if api_configured { "Yes" } else { "No" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_exact_commands() {
        assert_eq!(Command::parse("help"), Command::Help);
        assert_eq!(Command::parse("status"), Command::Status);
        assert_eq!(Command::parse("clear"), Command::Clear);
    }

    #[test]
    fn test_parse_case_insensitive_and_trimmed() {
        assert_eq!(Command::parse("  HELP "), Command::Help);
        assert_eq!(Command::parse("Status"), Command::Status);
        assert_eq!(Command::parse("cLeAr\n"), Command::Clear);
    }

    #[test]
    fn test_parse_run_prefix() {
        assert_eq!(Command::parse("run"), Command::Run("run".into()));
        assert_eq!(
            Command::parse("RUN deploy --prod"),
            Command::Run("RUN deploy --prod".into())
        );
        assert_eq!(Command::parse("runner"), Command::Run("runner".into()));
    }

    #[test]
    fn test_parse_unknown_keeps_original() {
        assert_eq!(Command::parse("Deploy now"), Command::Unknown("Deploy now".into()));
        assert_eq!(Command::parse("help me"), Command::Unknown("help me".into()));
        assert_eq!(Command::parse("statuses"), Command::Unknown("statuses".into()));
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            Command::not_found_message("foo"),
            "Command not found: foo. Type \"help\" for available commands."
        );
    }

    #[test]
    fn test_help_text_lists_four_commands() {
        let lines: Vec<_> = HELP_TEXT.lines().skip(1).collect();
        assert_eq!(lines.len(), 4);
        for name in ["help", "status", "clear", "run"] {
            assert!(lines.iter().any(|l| l.trim_start().starts_with(name)));
        }
    }

    #[test]
    fn test_format_status_line() {
        assert_eq!(
            format_status_line(false, 2, true),
            "Pipeline: Idle | Workflow runs: 2 | API key configured: Yes"
        );
        assert_eq!(
            format_status_line(true, 0, false),
            "Pipeline: Running | Workflow runs: 0 | API key configured: No"
        );
    }
}
