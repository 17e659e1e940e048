//! Configuration validation issues.
//!
//! Configuration is checked as a whole and every problem is reported at
//! once, each tagged with a severity. Errors stop startup; warnings are
//! printed and ignored.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `min_rounds`/`max_rounds` violate `1 <= min <= max`.
    InvalidRoundBounds,
    /// A timeout of zero seconds.
    ZeroTimeout { field: String },
    /// Two `[[teams]]` entries share an id.
    DuplicateTeam { team_id: String },
    /// A `[[teams]]` entry has a blank id.
    BlankTeamId,
    /// A model name is configured but empty.
    EmptyModelName { field: String },
    /// The overall timeout is shorter than a single team's timeout.
    OverallShorterThanTeam,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
