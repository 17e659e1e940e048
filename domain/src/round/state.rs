//! Round state - the outcome of one round for one team

use super::judgment::ImprovementJudgment;
use super::score::{EvaluationResult, Score, TokenUsage};
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one submit→evaluate→(maybe judge) cycle
///
/// Created by the round controller once evaluation completes. The only
/// later change is attaching the judgment for that round, which happens
/// before the round's final write to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    round_number: u32,
    submission: String,
    evaluation: EvaluationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    judgment: Option<ImprovementJudgment>,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    #[serde(default)]
    usage: TokenUsage,
    /// Interaction log of the leader; stored, never interpreted
    #[serde(default)]
    message_history: serde_json::Value,
}

impl RoundState {
    pub fn new(
        round_number: u32,
        submission: impl Into<String>,
        evaluation: EvaluationResult,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if round_number == 0 {
            return Err(DomainError::InvalidRoundNumber(round_number));
        }
        Ok(Self {
            round_number,
            submission: submission.into(),
            evaluation,
            judgment: None,
            started_at,
            finished_at,
            usage: TokenUsage::default(),
            message_history: serde_json::Value::Null,
        })
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = usage;
        self
    }

    pub fn with_message_history(mut self, history: serde_json::Value) -> Self {
        self.message_history = history;
        self
    }

    pub fn with_judgment(mut self, judgment: ImprovementJudgment) -> Self {
        self.judgment = Some(judgment);
        self
    }

    /// Copy without the interaction log, for storage that keeps it apart
    pub fn without_message_history(&self) -> Self {
        Self {
            message_history: serde_json::Value::Null,
            ..self.clone()
        }
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn submission(&self) -> &str {
        &self.submission
    }

    pub fn score(&self) -> Score {
        self.evaluation.overall_score
    }

    pub fn evaluation(&self) -> &EvaluationResult {
        &self.evaluation
    }

    pub fn judgment(&self) -> Option<&ImprovementJudgment> {
        self.judgment.as_ref()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }

    pub fn usage(&self) -> TokenUsage {
        self.usage
    }

    pub fn message_history(&self) -> &serde_json::Value {
        &self.message_history
    }

    /// Wall-clock duration of the round in milliseconds
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluation(score: f64) -> EvaluationResult {
        EvaluationResult::new(Score::new(score).unwrap())
    }

    #[test]
    fn test_round_zero_rejected() {
        let now = Utc::now();
        let result = RoundState::new(0, "x", evaluation(10.0), now, now);
        assert_eq!(result.unwrap_err(), DomainError::InvalidRoundNumber(0));
    }

    #[test]
    fn test_judgment_absent_by_default() {
        let now = Utc::now();
        let state = RoundState::new(1, "draft", evaluation(50.0), now, now).unwrap();
        assert!(state.judgment().is_none());

        let judged = state.with_judgment(ImprovementJudgment::new(true, "room to grow", 0.6).unwrap());
        assert!(judged.judgment().unwrap().should_continue());
    }

    #[test]
    fn test_serde_roundtrip_keeps_history_blob() {
        let now = Utc::now();
        let state = RoundState::new(2, "draft", evaluation(50.0), now, now)
            .unwrap()
            .with_message_history(serde_json::json!([{"role": "user", "content": "hi"}]));
        let json = serde_json::to_string(&state).unwrap();
        let back: RoundState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
        assert_eq!(back.message_history()[0]["role"], "user");
    }
}
