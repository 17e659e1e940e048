//! Execution setup: teams, round bounds, timeouts.

pub mod bounds;
pub mod orchestrator_task;
pub mod team;

pub use bounds::{NextStep, RoundBounds};
pub use orchestrator_task::{OrchestratorTask, RoundTimeouts, ensure_unique_team_ids};
pub use team::TeamConfig;
