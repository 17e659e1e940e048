//! Domain error types

use thiserror::Error;

/// Domain-level validation errors
///
/// Raised by constructors of the arena's record types. Every variant is a
/// configuration or data problem, never a runtime collaborator failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("User prompt cannot be empty")]
    EmptyPrompt,

    #[error("No teams configured")]
    NoTeams,

    #[error("Invalid team id: {0:?}")]
    InvalidTeamId(String),

    #[error("Duplicate team id: {0}")]
    DuplicateTeam(String),

    #[error("Invalid round bounds: min_rounds={min}, max_rounds={max} (need 1 <= min <= max)")]
    InvalidRoundBounds { min: u32, max: u32 },

    #[error("Invalid round number: {0} (rounds start at 1)")]
    InvalidRoundNumber(u32),

    #[error("Score {0} is outside the 0-100 range")]
    ScoreOutOfRange(f64),

    #[error("Confidence {0} is outside the 0.0-1.0 range")]
    ConfidenceOutOfRange(f64),

    #[error("Invalid timeout for {0}: must be greater than zero")]
    InvalidTimeout(&'static str),
}

impl DomainError {
    /// Whether this error comes from team configuration (as opposed to record data)
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyPrompt
                | DomainError::NoTeams
                | DomainError::InvalidTeamId(_)
                | DomainError::DuplicateTeam(_)
                | DomainError::InvalidRoundBounds { .. }
                | DomainError::InvalidTimeout(_)
        )
    }
}
