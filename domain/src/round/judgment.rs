//! Improvement judgment types
//!
//! The judgment answers one question after a round: is another round
//! likely to improve the team's result?

use crate::core::error::DomainError;
use crate::core::ids::TeamId;
use serde::{Deserialize, Serialize};

/// Decision produced by the judge collaborator
///
/// # Example
///
/// ```
/// use arena_domain::ImprovementJudgment;
///
/// let judgment = ImprovementJudgment::new(false, "Scores have plateaued", 0.8).unwrap();
/// assert!(!judgment.should_continue());
/// assert!(ImprovementJudgment::new(true, "", 1.5).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementJudgment {
    should_continue: bool,
    reasoning: String,
    confidence: f64,
}

impl ImprovementJudgment {
    pub fn new(
        should_continue: bool,
        reasoning: impl Into<String>,
        confidence: f64,
    ) -> Result<Self, DomainError> {
        if confidence.is_nan() || !(0.0..=1.0).contains(&confidence) {
            return Err(DomainError::ConfidenceOutOfRange(confidence));
        }
        Ok(Self {
            should_continue,
            reasoning: reasoning.into(),
            confidence,
        })
    }

    pub fn should_continue(&self) -> bool {
        self.should_continue
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// Condensed view of one completed round, as shown to the judge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundDigest {
    pub round_number: u32,
    pub score: f64,
    pub feedback: String,
    pub submission_excerpt: String,
}

/// Everything the judge needs to decide whether to run another round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgmentContext {
    pub user_prompt: String,
    pub team_id: TeamId,
    pub team_name: String,
    pub min_rounds: u32,
    pub max_rounds: u32,
    pub rounds: Vec<RoundDigest>,
}

impl JudgmentContext {
    /// Round number of the most recent round, 0 when empty
    pub fn current_round(&self) -> u32 {
        self.rounds.last().map(|r| r.round_number).unwrap_or(0)
    }

    /// Best score seen so far
    pub fn best_score(&self) -> Option<f64> {
        self.rounds
            .iter()
            .map(|r| r.score)
            .max_by(|a, b| a.total_cmp(b))
    }

    /// Rounds still available after the current one
    pub fn remaining_rounds(&self) -> u32 {
        self.max_rounds.saturating_sub(self.current_round())
    }
}
