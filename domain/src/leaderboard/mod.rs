//! Leaderboard: the rankable, best-per-team projection of round history.

pub mod entry;
pub mod ordering;
pub mod summary;

pub use entry::{LeaderBoardEntry, RankPosition, TeamRanking, rank_of};
pub use ordering::{best_entry, leaderboard_order, sort_leaderboard};
pub use summary::{ExecutionSummary, FailedTeamInfo};
