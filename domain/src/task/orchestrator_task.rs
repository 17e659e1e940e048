//! The user request fanned out to every team

use super::bounds::RoundBounds;
use super::team::TeamConfig;
use crate::core::error::DomainError;
use crate::core::ids::ExecutionId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Time limits applied while running an execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTimeouts {
    /// Bound on each leader and evaluator call
    pub submission: Duration,
    /// Bound on each judgment call
    pub judgment: Duration,
    /// Bound on one team's whole round loop
    pub team: Duration,
}

impl Default for RoundTimeouts {
    fn default() -> Self {
        Self {
            submission: Duration::from_secs(300),
            judgment: Duration::from_secs(120),
            team: Duration::from_secs(1800),
        }
    }
}

impl RoundTimeouts {
    fn validate(&self) -> Result<(), DomainError> {
        if self.submission.is_zero() {
            return Err(DomainError::InvalidTimeout("submission"));
        }
        if self.judgment.is_zero() {
            return Err(DomainError::InvalidTimeout("judgment"));
        }
        if self.team.is_zero() {
            return Err(DomainError::InvalidTimeout("team"));
        }
        Ok(())
    }
}

/// One user request fanned out to many teams
///
/// Built once per orchestrator execution and read-only afterwards. The
/// constructor rejects an empty prompt, an empty team list and duplicate
/// team ids before any round runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorTask {
    execution_id: ExecutionId,
    user_prompt: String,
    teams: Vec<TeamConfig>,
    bounds: RoundBounds,
    timeouts: RoundTimeouts,
}

impl OrchestratorTask {
    pub fn new(
        execution_id: ExecutionId,
        user_prompt: impl Into<String>,
        teams: Vec<TeamConfig>,
        bounds: RoundBounds,
        timeouts: RoundTimeouts,
    ) -> Result<Self, DomainError> {
        let user_prompt = user_prompt.into();
        if user_prompt.trim().is_empty() {
            return Err(DomainError::EmptyPrompt);
        }
        if teams.is_empty() {
            return Err(DomainError::NoTeams);
        }
        ensure_unique_team_ids(&teams)?;
        timeouts.validate()?;

        Ok(Self {
            execution_id,
            user_prompt,
            teams,
            bounds,
            timeouts,
        })
    }

    pub fn execution_id(&self) -> &ExecutionId {
        &self.execution_id
    }

    pub fn user_prompt(&self) -> &str {
        &self.user_prompt
    }

    pub fn teams(&self) -> &[TeamConfig] {
        &self.teams
    }

    pub fn bounds(&self) -> RoundBounds {
        self.bounds
    }

    pub fn timeouts(&self) -> RoundTimeouts {
        self.timeouts
    }
}

/// Reject the first team id that appears twice
pub fn ensure_unique_team_ids(teams: &[TeamConfig]) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for team in teams {
        if !seen.insert(team.team_id.as_str()) {
            return Err(DomainError::DuplicateTeam(team.team_id.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::TeamId;

    fn team(id: &str) -> TeamConfig {
        TeamConfig::new(TeamId::new(id).unwrap())
    }

    fn build(prompt: &str, teams: Vec<TeamConfig>) -> Result<OrchestratorTask, DomainError> {
        OrchestratorTask::new(
            ExecutionId::generate(),
            prompt,
            teams,
            RoundBounds::default(),
            RoundTimeouts::default(),
        )
    }

    #[test]
    fn test_valid_task() {
        let task = build("Summarize this", vec![team("a"), team("b")]).unwrap();
        assert_eq!(task.teams().len(), 2);
        assert_eq!(task.user_prompt(), "Summarize this");
    }

    #[test]
    fn test_duplicate_team_rejected() {
        let err = build("Summarize", vec![team("a"), team("b"), team("a")]).unwrap_err();
        assert_eq!(err, DomainError::DuplicateTeam("a".to_string()));
    }

    #[test]
    fn test_empty_prompt_rejected() {
        assert_eq!(build("   ", vec![team("a")]).unwrap_err(), DomainError::EmptyPrompt);
    }

    #[test]
    fn test_no_teams_rejected() {
        assert_eq!(build("go", vec![]).unwrap_err(), DomainError::NoTeams);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let timeouts = RoundTimeouts {
            judgment: Duration::ZERO,
            ..RoundTimeouts::default()
        };
        let err = OrchestratorTask::new(
            ExecutionId::generate(),
            "go",
            vec![team("a")],
            RoundBounds::default(),
            timeouts,
        )
        .unwrap_err();
        assert_eq!(err, DomainError::InvalidTimeout("judgment"));
    }
}
