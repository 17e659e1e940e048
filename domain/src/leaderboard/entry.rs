//! Leaderboard rows and ranking views

use crate::core::ids::{ExecutionId, TeamId};
use crate::round::exit::ExitReason;
use crate::round::score::Score;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One team's result for one round, as stored in the leaderboard
///
/// Rows are keyed by `(execution_id, team_id, round_number)`. A team's
/// current standing is derived by the ranking query, not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderBoardEntry {
    pub execution_id: ExecutionId,
    pub team_id: TeamId,
    pub team_name: String,
    pub round_number: u32,
    pub submission_content: String,
    pub score: Score,
    pub score_details: serde_json::Value,
    pub final_submission: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_reason: Option<ExitReason>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Live standing of one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRanking {
    pub team_id: TeamId,
    pub team_name: String,
    pub max_score: Score,
    pub total_rounds: u32,
}

/// A team's position in the live ranking (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankPosition {
    pub rank: usize,
    pub total_teams: usize,
}

/// Find `team_id`'s 1-based position in an ordered ranking
pub fn rank_of(rankings: &[TeamRanking], team_id: &TeamId) -> Option<RankPosition> {
    rankings
        .iter()
        .position(|r| &r.team_id == team_id)
        .map(|index| RankPosition {
            rank: index + 1,
            total_teams: rankings.len(),
        })
}
