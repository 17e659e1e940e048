//! Output formatter trait

use arena_domain::ExecutionSummary;

/// Trait for formatting execution results
pub trait OutputFormatter {
    /// Full summary: leaderboard, failures and the winning submission
    fn format(&self, summary: &ExecutionSummary) -> String;

    /// Format as JSON
    fn format_json(&self, summary: &ExecutionSummary) -> String;

    /// Leaderboard table only
    fn format_leaderboard(&self, summary: &ExecutionSummary) -> String;
}
