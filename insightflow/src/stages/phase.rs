//! The fixed phases of the automation pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One step of the four-phase automation pipeline.
///
/// Phases are visited strictly in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The typed command is accepted and parsed.
    Cli,
    /// A local script processes the command.
    Python,
    /// The completion service is asked for suggestions.
    Perplexity,
    /// A CI workflow run is recorded.
    Github,
}

impl Phase {
    /// All phases in execution order.
    pub const ALL: [Self; 4] = [Self::Cli, Self::Python, Self::Perplexity, Self::Github];

    /// The stage id used by the tracker.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::Python => "python",
            Self::Perplexity => "perplexity",
            Self::Github => "github",
        }
    }

    /// Display title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Cli => "CLI Input",
            Self::Python => "Python Script",
            Self::Perplexity => "Perplexity API",
            Self::Github => "GitHub Actions",
        }
    }

    /// Longer description shown for the active stage.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Cli => "Parsing and validating the submitted command",
            Self::Python => "Running the automation script for the command",
            Self::Perplexity => "Requesting AI suggestions for the command",
            Self::Github => "Triggering the CI workflow",
        }
    }

    /// The phase after this one, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Cli => Some(Self::Python),
            Self::Python => Some(Self::Perplexity),
            Self::Perplexity => Some(Self::Github),
            Self::Github => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown phase: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order() {
        let ids: Vec<_> = Phase::ALL.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["cli", "python", "perplexity", "github"]);
    }

    #[test]
    fn test_phase_next_chain() {
        let mut chain = vec![Phase::Cli];
        while let Some(next) = chain.last().and_then(|p| p.next()) {
            chain.push(next);
        }
        assert_eq!(chain, Phase::ALL.to_vec());
    }

    #[test]
    fn test_phase_from_str() {
        assert_eq!("GitHub".parse::<Phase>().unwrap(), Phase::Github);
        assert!("deploy".parse::<Phase>().is_err());
    }

    #[test]
    fn test_phase_serialize() {
        let json = serde_json::to_string(&Phase::Perplexity).unwrap();
        assert_eq!(json, r#""perplexity""#);
    }
}
