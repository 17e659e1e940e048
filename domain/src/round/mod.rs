//! Round records
//!
//! A round is one submit→evaluate→(maybe judge) cycle for a single team.
//! These types are the data contracts between the round controller, its
//! collaborators and the store.

pub mod exit;
pub mod history;
pub mod judgment;
pub mod score;
pub mod state;

pub use exit::ExitReason;
pub use history::RoundHistory;
pub use judgment::{ImprovementJudgment, JudgmentContext, RoundDigest};
pub use score::{EvaluationResult, MAX_SCORE, MetricScore, Score, TokenUsage};
pub use state::RoundState;
