//! Execution parameters for the orchestrator and round loop.
//!
//! [`ExecutionParams`] groups the static parameters that control an
//! execution in [`RunArenaUseCase`](crate::use_cases::run_arena::RunArenaUseCase).
//! These are application-layer concerns, not domain policy.

use arena_domain::{RoundBounds, RoundTimeouts};
use std::time::Duration;

/// Default number of rows read back from the leaderboard
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 100;

/// Execution control parameters.
///
/// Round bounds and per-call timeouts apply to every team; the overall
/// timeout bounds the whole fan-out.
#[derive(Debug, Clone)]
pub struct ExecutionParams {
    pub bounds: RoundBounds,
    pub timeouts: RoundTimeouts,
    /// Bound on the whole execution; `None` waits for every team
    pub overall_timeout: Option<Duration>,
    /// How long tasks get to observe cancellation before being aborted
    pub cancel_grace: Duration,
    pub leaderboard_limit: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            bounds: RoundBounds::default(),
            timeouts: RoundTimeouts::default(),
            overall_timeout: Some(Duration::from_secs(3600)),
            cancel_grace: Duration::from_secs(2),
            leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_bounds(mut self, bounds: RoundBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_timeouts(mut self, timeouts: RoundTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_overall_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.overall_timeout = timeout;
        self
    }

    pub fn with_cancel_grace(mut self, grace: Duration) -> Self {
        self.cancel_grace = grace;
        self
    }

    pub fn with_leaderboard_limit(mut self, limit: usize) -> Self {
        self.leaderboard_limit = limit.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert_eq!(params.bounds, RoundBounds::default());
        assert_eq!(params.leaderboard_limit, DEFAULT_LEADERBOARD_LIMIT);
        assert!(params.overall_timeout.is_some());
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default()
            .with_bounds(RoundBounds::new(2, 4).unwrap())
            .with_overall_timeout(None)
            .with_leaderboard_limit(0);

        assert_eq!(params.bounds.min_rounds(), 2);
        assert_eq!(params.bounds.max_rounds(), 4);
        assert!(params.overall_timeout.is_none());
        assert_eq!(params.leaderboard_limit, 1);
    }
}
