//! Judgment decision protocol
//!
//! Turns a team's round history into a [`JudgmentContext`] and asks the
//! [`ImprovementJudge`] whether another round is worthwhile. Stateless;
//! failures are returned to the caller, which decides what they mean.

use crate::ports::collaborator::{CollaboratorError, ImprovementJudge};
use arena_domain::{
    ImprovementJudgment, JudgmentContext, PromptTemplate, RoundBounds, RoundDigest, RoundHistory,
    TeamConfig,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct JudgmentProtocol {
    judge: Arc<dyn ImprovementJudge>,
    timeout: Duration,
}

impl JudgmentProtocol {
    pub fn new(judge: Arc<dyn ImprovementJudge>, timeout: Duration) -> Self {
        Self { judge, timeout }
    }

    pub fn build_context(
        user_prompt: &str,
        team: &TeamConfig,
        bounds: RoundBounds,
        history: &RoundHistory,
    ) -> JudgmentContext {
        let rounds = history
            .iter()
            .map(|state| RoundDigest {
                round_number: state.round_number(),
                score: state.score().value(),
                feedback: state.evaluation().feedback(),
                submission_excerpt: PromptTemplate::submission_excerpt(state.submission()),
            })
            .collect();

        JudgmentContext {
            user_prompt: user_prompt.to_string(),
            team_id: team.team_id.clone(),
            team_name: team.team_name.clone(),
            min_rounds: bounds.min_rounds(),
            max_rounds: bounds.max_rounds(),
            rounds,
        }
    }

    /// Ask the judge, bounded by the judgment timeout. Never retries.
    pub async fn decide(
        &self,
        context: &JudgmentContext,
    ) -> Result<ImprovementJudgment, CollaboratorError> {
        debug!(
            team_id = %context.team_id,
            round = context.current_round(),
            "Requesting improvement judgment"
        );
        match tokio::time::timeout(self.timeout, self.judge.judge(context)).await {
            Ok(result) => result,
            Err(_) => Err(CollaboratorError::Timeout(self.timeout)),
        }
    }
}
