//! Domain layer for team-arena
//!
//! This crate contains the records, validation rules and pure logic of the
//! arena. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Teams and Rounds
//!
//! An execution fans one user prompt out to several independent teams.
//! Each team runs rounds: submit → evaluate → (maybe judge). Round numbers
//! are contiguous from 1 and bounded by [`RoundBounds`].
//!
//! ```text
//! Init ──▶ Running(k) ──▶ Evaluated(k) ──┬──▶ Running(k+1)   k < min_rounds
//!                                         ├──▶ Judging(k)     min_rounds <= k < max_rounds
//!                                         └──▶ Done           k >= max_rounds
//! ```
//!
//! ## Leaderboard
//!
//! Every evaluated round is rankable. A team's standing is its best round
//! (ties → earliest), and the execution's winner is the best standing
//! across teams, ordered by [`leaderboard_order`].

pub mod config;
pub mod core;
pub mod leaderboard;
pub mod parsing;
pub mod prompt;
pub mod round;
pub mod task;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use crate::core::{
    error::DomainError,
    ids::{ExecutionId, TeamId},
};
pub use leaderboard::{
    ExecutionSummary, FailedTeamInfo, LeaderBoardEntry, RankPosition, TeamRanking, best_entry,
    leaderboard_order, rank_of, sort_leaderboard,
};
pub use parsing::{ParseError, parse_evaluation, parse_judgment};
pub use prompt::{PreviousRound, PromptTemplate};
pub use round::{
    EvaluationResult, ExitReason, ImprovementJudgment, JudgmentContext, MetricScore,
    RoundDigest, RoundHistory, RoundState, Score, TokenUsage,
};
pub use task::{NextStep, OrchestratorTask, RoundBounds, RoundTimeouts, TeamConfig};
