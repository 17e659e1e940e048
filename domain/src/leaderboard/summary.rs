//! Final execution summary

use super::entry::LeaderBoardEntry;
use super::ordering::{best_entry, sort_leaderboard};
use crate::core::ids::{ExecutionId, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A team whose round loop failed irrecoverably
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedTeamInfo {
    pub team_id: TeamId,
    pub team_name: String,
    pub error: String,
    /// Round in progress when the failure happened, if any had started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_round: Option<u32>,
}

impl FailedTeamInfo {
    pub fn new(team_id: TeamId, team_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            team_id,
            team_name: team_name.into(),
            error: error.into(),
            failed_round: None,
        }
    }

    pub fn in_round(mut self, round: u32) -> Self {
        self.failed_round = Some(round);
        self
    }
}

/// Result of one orchestrator execution
///
/// Always produced, even when every team failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub execution_id: ExecutionId,
    pub user_prompt: String,
    /// Successful teams' final entries, best first
    pub results: Vec<LeaderBoardEntry>,
    pub failed_teams: Vec<FailedTeamInfo>,
    pub best: Option<LeaderBoardEntry>,
    pub total_teams: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ExecutionSummary {
    pub fn new(
        execution_id: ExecutionId,
        user_prompt: impl Into<String>,
        mut results: Vec<LeaderBoardEntry>,
        failed_teams: Vec<FailedTeamInfo>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        sort_leaderboard(&mut results);
        let best = best_entry(&results).cloned();
        let succeeded = results.len();
        let failed = failed_teams.len();

        Self {
            execution_id,
            user_prompt: user_prompt.into(),
            results,
            failed_teams,
            best,
            total_teams: succeeded + failed,
            succeeded,
            failed,
            started_at,
            finished_at,
        }
    }

    pub fn all_failed(&self) -> bool {
        self.succeeded == 0
    }

    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::score::Score;

    fn entry(team: &str, score: f64) -> LeaderBoardEntry {
        let now = Utc::now();
        LeaderBoardEntry {
            execution_id: ExecutionId::new("exec"),
            team_id: TeamId::new(team).unwrap(),
            team_name: team.to_string(),
            round_number: 1,
            submission_content: String::new(),
            score: Score::new(score).unwrap(),
            score_details: serde_json::Value::Null,
            final_submission: true,
            exit_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_counts_and_best() {
        let now = Utc::now();
        let summary = ExecutionSummary::new(
            ExecutionId::new("exec"),
            "prompt",
            vec![entry("a", 40.0), entry("b", 75.0)],
            vec![FailedTeamInfo::new(TeamId::new("c").unwrap(), "c", "timed out")],
            now,
            now,
        );
        assert_eq!(summary.total_teams, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.best.as_ref().unwrap().team_id.as_str(), "b");
        assert_eq!(summary.results[0].team_id.as_str(), "b");
    }

    #[test]
    fn test_all_failed_still_summarizes() {
        let now = Utc::now();
        let summary = ExecutionSummary::new(
            ExecutionId::new("exec"),
            "prompt",
            vec![],
            vec![FailedTeamInfo::new(TeamId::new("a").unwrap(), "a", "boom").in_round(2)],
            now,
            now,
        );
        assert!(summary.all_failed());
        assert!(summary.best.is_none());
        assert_eq!(summary.failed_teams[0].failed_round, Some(2));
    }
}
