//! Ranking order shared by the store query and in-memory fallbacks
//!
//! Higher score first; on equal score the entry created first wins, so the
//! team that reached a score earliest ranks above teams that matched it
//! later.

use super::entry::LeaderBoardEntry;
use std::cmp::Ordering;

/// Compare two entries in leaderboard order (best first)
pub fn leaderboard_order(a: &LeaderBoardEntry, b: &LeaderBoardEntry) -> Ordering {
    b.score
        .cmp_value(&a.score)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.round_number.cmp(&b.round_number))
}

/// Sort entries best-first
pub fn sort_leaderboard(entries: &mut [LeaderBoardEntry]) {
    entries.sort_by(leaderboard_order);
}

/// The single best entry, using leaderboard order
pub fn best_entry(entries: &[LeaderBoardEntry]) -> Option<&LeaderBoardEntry> {
    entries.iter().min_by(|a, b| leaderboard_order(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::{ExecutionId, TeamId};
    use crate::round::score::Score;
    use chrono::{Duration, Utc};

    fn entry(team: &str, score: f64, offset_ms: i64) -> LeaderBoardEntry {
        let created = Utc::now() + Duration::milliseconds(offset_ms);
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
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_score_descending() {
        let mut entries = vec![entry("a", 50.0, 0), entry("b", 90.0, 10), entry("c", 70.0, 5)];
        sort_leaderboard(&mut entries);
        let order: Vec<_> = entries.iter().map(|e| e.team_id.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_tie_goes_to_earliest() {
        let late = entry("late", 80.0, 100);
        let early = entry("early", 80.0, 0);
        let entries = vec![late, early];
        assert_eq!(best_entry(&entries).unwrap().team_id.as_str(), "early");
    }

    #[test]
    fn test_best_entry_empty() {
        assert!(best_entry(&[]).is_none());
    }
}
