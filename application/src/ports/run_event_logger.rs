//! Run event log port
//!
//! A machine-readable account of one execution, next to the human-oriented
//! `tracing` output. Adapters decide the framing; events carry no timestamps.

use arena_domain::{ExecutionId, ExitReason, TeamId};
use serde::Serialize;

/// Something that happened during an execution
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
    ExecutionStarted {
        execution_id: ExecutionId,
        teams: usize,
        min_rounds: u32,
        max_rounds: u32,
    },
    TeamStarted {
        team_id: TeamId,
        team_name: String,
    },
    RoundScored {
        team_id: TeamId,
        round: u32,
        score: f64,
        input_tokens: u64,
        output_tokens: u64,
        duration_ms: i64,
    },
    Judgment {
        team_id: TeamId,
        round: u32,
        should_continue: bool,
        confidence: f64,
        reasoning: String,
    },
    TeamFinished {
        team_id: TeamId,
        best_round: u32,
        score: f64,
        rounds: usize,
        exit_reason: ExitReason,
    },
    TeamFailed {
        team_id: TeamId,
        round: Option<u32>,
        error: String,
    },
    ExecutionFinished {
        execution_id: ExecutionId,
        succeeded: usize,
        failed: usize,
        best_team: Option<TeamId>,
        best_score: Option<f64>,
        duration_ms: i64,
    },
}

impl RunEvent {
    /// The `type` tag written for this event
    pub fn kind(&self) -> &'static str {
        match self {
            RunEvent::ExecutionStarted { .. } => "execution_started",
            RunEvent::TeamStarted { .. } => "team_started",
            RunEvent::RoundScored { .. } => "round_scored",
            RunEvent::Judgment { .. } => "judgment",
            RunEvent::TeamFinished { .. } => "team_finished",
            RunEvent::TeamFailed { .. } => "team_failed",
            RunEvent::ExecutionFinished { .. } => "execution_finished",
        }
    }
}

/// Sink for run events
///
/// `log` never fails: a broken event log must not disturb the execution.
pub trait RunEventLogger: Send + Sync {
    fn log(&self, event: RunEvent);
}

/// Discards every event
pub struct NoRunEventLogger;

impl RunEventLogger for NoRunEventLogger {
    fn log(&self, _event: RunEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_serialized_tag() {
        let events = [
            RunEvent::TeamStarted {
                team_id: TeamId::new("alpha").unwrap(),
                team_name: "Alpha".to_string(),
            },
            RunEvent::TeamFinished {
                team_id: TeamId::new("alpha").unwrap(),
                best_round: 2,
                score: 81.0,
                rounds: 3,
                exit_reason: ExitReason::NoImprovementExpected,
            },
            RunEvent::TeamFailed {
                team_id: TeamId::new("beta").unwrap(),
                round: None,
                error: "cancelled".to_string(),
            },
        ];

        for event in events {
            let value = serde_json::to_value(&event).unwrap();
            assert_eq!(value["type"], event.kind());
        }
    }

    #[test]
    fn test_fields_are_flat() {
        let event = RunEvent::TeamFinished {
            team_id: TeamId::new("alpha").unwrap(),
            best_round: 2,
            score: 81.0,
            rounds: 3,
            exit_reason: ExitReason::MaxRoundsReached,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["team_id"], "alpha");
        assert_eq!(value["exit_reason"], "max rounds reached");
    }
}
