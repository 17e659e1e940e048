//! Why a team's round loop ended

use serde::{Deserialize, Serialize};
use std::fmt;

/// Termination reason attached to a team's final submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    /// The team ran `max_rounds` rounds; judgment was not consulted
    #[serde(rename = "max rounds reached")]
    MaxRoundsReached,
    /// The judge decided another round would not help
    #[serde(rename = "no improvement expected")]
    NoImprovementExpected,
}

impl ExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::MaxRoundsReached => "max rounds reached",
            ExitReason::NoImprovementExpected => "no improvement expected",
        }
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serialized_form() {
        for reason in [ExitReason::MaxRoundsReached, ExitReason::NoImprovementExpected] {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{}\"", reason));
        }
    }
}
