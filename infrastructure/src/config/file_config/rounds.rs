//! Round loop configuration from TOML (`[rounds]` and `[timeouts]` sections)

use arena_domain::{ConfigIssue, ConfigIssueCode, DomainError, RoundBounds, RoundTimeouts};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Round bounds applied to every team
///
/// # Example
///
/// ```toml
/// [rounds]
/// min = 2
/// max = 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoundsConfig {
    pub min: u32,
    pub max: u32,
}

impl Default for FileRoundsConfig {
    fn default() -> Self {
        let bounds = RoundBounds::default();
        Self {
            min: bounds.min_rounds(),
            max: bounds.max_rounds(),
        }
    }
}

impl FileRoundsConfig {
    pub fn to_bounds(&self) -> Result<RoundBounds, DomainError> {
        RoundBounds::new(self.min, self.max)
    }

    pub(super) fn issues(&self) -> Vec<ConfigIssue> {
        match self.to_bounds() {
            Ok(_) => Vec::new(),
            Err(e) => vec![ConfigIssue::error(
                ConfigIssueCode::InvalidRoundBounds,
                format!("rounds: {}", e),
            )],
        }
    }
}

/// Time limits, in seconds
///
/// `overall_secs = 0` lets the execution run until every team finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTimeoutsConfig {
    /// Bound on each leader and evaluator call
    pub submission_secs: u64,
    /// Bound on each judgment call
    pub judgment_secs: u64,
    /// Bound on one team's whole round loop
    pub team_secs: u64,
    /// Bound on the whole execution
    pub overall_secs: u64,
}

impl Default for FileTimeoutsConfig {
    fn default() -> Self {
        let timeouts = RoundTimeouts::default();
        Self {
            submission_secs: timeouts.submission.as_secs(),
            judgment_secs: timeouts.judgment.as_secs(),
            team_secs: timeouts.team.as_secs(),
            overall_secs: 3600,
        }
    }
}

impl FileTimeoutsConfig {
    pub fn to_timeouts(&self) -> RoundTimeouts {
        RoundTimeouts {
            submission: Duration::from_secs(self.submission_secs),
            judgment: Duration::from_secs(self.judgment_secs),
            team: Duration::from_secs(self.team_secs),
        }
    }

    pub fn overall(&self) -> Option<Duration> {
        (self.overall_secs > 0).then(|| Duration::from_secs(self.overall_secs))
    }

    pub(super) fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (field, value) in [
            ("submission_secs", self.submission_secs),
            ("judgment_secs", self.judgment_secs),
            ("team_secs", self.team_secs),
        ] {
            if value == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroTimeout {
                        field: field.to_string(),
                    },
                    format!("timeouts.{}: must be greater than zero", field),
                ));
            }
        }

        if self.overall_secs > 0 && self.overall_secs < self.team_secs {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OverallShorterThanTeam,
                format!(
                    "timeouts.overall_secs ({}) is shorter than timeouts.team_secs ({}); \
                     teams may be cut off by the overall timeout",
                    self.overall_secs, self.team_secs
                ),
            ));
        }
        issues
    }
}
