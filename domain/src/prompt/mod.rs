//! Prompt domain
//!
//! Templates for the leader, evaluator and judge prompts of a round.

mod template;

pub use template::{PromptTemplate, PreviousRound};
