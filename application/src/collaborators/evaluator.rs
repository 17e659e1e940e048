use crate::ports::collaborator::{CollaboratorError, Evaluator};
use crate::ports::llm_gateway::LlmGateway;
use arena_domain::{EvaluationResult, PromptTemplate, parse_evaluation};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Evaluator backed by one model; replies must carry a JSON score object
pub struct LlmEvaluator {
    gateway: Arc<dyn LlmGateway>,
    model: String,
}

impl LlmEvaluator {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: impl Into<String>) -> Self {
        Self {
            gateway,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Evaluator for LlmEvaluator {
    async fn evaluate(
        &self,
        user_query: &str,
        submission: &str,
    ) -> Result<EvaluationResult, CollaboratorError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(&self.model, PromptTemplate::evaluator_system())
            .await?;
        let reply = session
            .send(&PromptTemplate::evaluation_prompt(user_query, submission))
            .await?;

        let evaluation = parse_evaluation(&reply.content).inspect_err(|e| {
            warn!(model = %self.model, "Unparseable evaluation reply: {}", e);
        })?;
        debug!(score = evaluation.overall_score.value(), "Submission evaluated");
        Ok(evaluation)
    }
}
