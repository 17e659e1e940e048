//! LLM-backed collaborators
//!
//! Implementations of the collaborator ports on top of [`LlmGateway`]:
//! each call opens a fresh session with the role's system prompt, sends one
//! prompt built by [`PromptTemplate`](arena_domain::PromptTemplate), and
//! parses the reply with the domain parsers.
//!
//! [`LlmGateway`]: crate::ports::llm_gateway::LlmGateway

pub mod evaluator;
pub mod judge;
pub mod leader;

pub use evaluator::LlmEvaluator;
pub use judge::LlmJudge;
pub use leader::LlmLeader;
