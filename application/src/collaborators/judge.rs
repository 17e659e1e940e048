use crate::ports::collaborator::{CollaboratorError, ImprovementJudge};
use crate::ports::llm_gateway::LlmGateway;
use arena_domain::{ImprovementJudgment, JudgmentContext, PromptTemplate, parse_judgment};
use async_trait::async_trait;
use std::sync::Arc;

pub struct LlmJudge {
    gateway: Arc<dyn LlmGateway>,
    model: String,
}

impl LlmJudge {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: impl Into<String>) -> Self {
        Self {
            gateway,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ImprovementJudge for LlmJudge {
    async fn judge(
        &self,
        context: &JudgmentContext,
    ) -> Result<ImprovementJudgment, CollaboratorError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(&self.model, PromptTemplate::judgment_system())
            .await?;
        let reply = session
            .send(&PromptTemplate::judgment_prompt(context))
            .await?;
        Ok(parse_judgment(&reply.content)?)
    }
}
