//! Progress notification port
//!
//! Defines the interface for reporting progress during an arena execution.
//! Callbacks arrive concurrently from every team task.

use arena_domain::{ExitReason, TeamId};

/// Callback for progress updates during an execution
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.)
pub trait ArenaProgressNotifier: Send + Sync {
    /// Called once before any team starts
    fn on_execution_start(&self, total_teams: usize);

    /// Called when a team's task starts
    fn on_team_start(&self, team_id: &TeamId, team_name: &str);

    /// Called after a round is evaluated and persisted
    fn on_round_complete(&self, team_id: &TeamId, round_number: u32, score: f64);

    /// Called after the improvement judge answered
    fn on_judgment(&self, _team_id: &TeamId, _round_number: u32, _should_continue: bool) {}

    /// Called when a team finishes successfully
    fn on_team_finished(&self, team_id: &TeamId, best_score: f64, reason: ExitReason);

    /// Called when a team fails
    fn on_team_failed(&self, team_id: &TeamId, error: &str);

    /// Called once after every team has finished or failed
    fn on_execution_complete(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ArenaProgressNotifier for NoProgress {
    fn on_execution_start(&self, _total_teams: usize) {}
    fn on_team_start(&self, _team_id: &TeamId, _team_name: &str) {}
    fn on_round_complete(&self, _team_id: &TeamId, _round_number: u32, _score: f64) {}
    fn on_team_finished(&self, _team_id: &TeamId, _best_score: f64, _reason: ExitReason) {}
    fn on_team_failed(&self, _team_id: &TeamId, _error: &str) {}
}
