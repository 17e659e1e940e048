use crate::ports::collaborator::{CollaboratorError, LeaderAgent, LeaderOutput};
use crate::ports::llm_gateway::LlmGateway;
use arena_domain::{PromptTemplate, TeamConfig, TokenUsage};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Leader that answers with a single model call per round
pub struct LlmLeader {
    gateway: Arc<dyn LlmGateway>,
    default_model: String,
}

impl LlmLeader {
    pub fn new(gateway: Arc<dyn LlmGateway>, default_model: impl Into<String>) -> Self {
        Self {
            gateway,
            default_model: default_model.into(),
        }
    }
}

#[async_trait]
impl LeaderAgent for LlmLeader {
    async fn run(
        &self,
        team: &TeamConfig,
        task_description: &str,
    ) -> Result<LeaderOutput, CollaboratorError> {
        let model = team.model.as_deref().unwrap_or(&self.default_model);
        debug!(team_id = %team.team_id, model, "Leader producing submission");

        let session = self
            .gateway
            .create_session_with_system_prompt(model, PromptTemplate::leader_system())
            .await?;
        let reply = session.send(task_description).await?;

        if reply.content.trim().is_empty() {
            return Err(CollaboratorError::InvalidResponse(
                "leader returned an empty submission".to_string(),
            ));
        }

        Ok(LeaderOutput::new(reply.content)
            .with_usage(TokenUsage::new(reply.input_tokens, reply.output_tokens))
            .with_message_history(session.transcript()))
    }
}
