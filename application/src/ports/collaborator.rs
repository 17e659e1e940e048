//! Collaborator ports
//!
//! The three services a round consumes: the leader produces a submission,
//! the evaluator scores it, the judge decides whether another round is
//! worthwhile. How they do it (models, tools, retries) is opaque here.

use super::llm_gateway::GatewayError;
use arena_domain::{
    EvaluationResult, ImprovementJudgment, JudgmentContext, ParseError, TeamConfig, TokenUsage,
};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by any collaborator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollaboratorError {
    #[error("Timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Request failed: {0}")]
    Failed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CollaboratorError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, CollaboratorError::Timeout(_))
    }
}

impl From<GatewayError> for CollaboratorError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::Timeout => CollaboratorError::Failed("gateway timeout".to_string()),
            other => CollaboratorError::Failed(other.to_string()),
        }
    }
}

impl From<ParseError> for CollaboratorError {
    fn from(error: ParseError) -> Self {
        CollaboratorError::InvalidResponse(error.to_string())
    }
}

/// What the leader hands back for one round
#[derive(Debug, Clone, Default)]
pub struct LeaderOutput {
    pub content: String,
    pub usage: TokenUsage,
    /// Interaction log; stored with the round, never interpreted
    pub message_history: serde_json::Value,
}

impl LeaderOutput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: TokenUsage::default(),
            message_history: serde_json::Value::Null,
        }
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = usage;
        self
    }

    pub fn with_message_history(mut self, history: serde_json::Value) -> Self {
        self.message_history = history;
        self
    }
}

/// Produces a team's submission for a round
#[async_trait]
pub trait LeaderAgent: Send + Sync {
    async fn run(
        &self,
        team: &TeamConfig,
        task_description: &str,
    ) -> Result<LeaderOutput, CollaboratorError>;
}

/// Scores a submission against the user's task
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(
        &self,
        user_query: &str,
        submission: &str,
    ) -> Result<EvaluationResult, CollaboratorError>;
}

/// Decides whether another round is likely to improve the result
#[async_trait]
pub trait ImprovementJudge: Send + Sync {
    async fn judge(
        &self,
        context: &JudgmentContext,
    ) -> Result<ImprovementJudgment, CollaboratorError>;
}
