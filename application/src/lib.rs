//! Application layer for team-arena
//!
//! This crate contains use cases, port definitions, LLM-backed
//! collaborators and application configuration. It depends only on the
//! domain layer.

pub mod collaborators;
pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use collaborators::{LlmEvaluator, LlmJudge, LlmLeader};
pub use config::ExecutionParams;
pub use ports::{
    collaborator::{CollaboratorError, Evaluator, ImprovementJudge, LeaderAgent, LeaderOutput},
    llm_gateway::{GatewayError, LlmGateway, LlmReply, LlmSession},
    progress::{ArenaProgressNotifier, NoProgress},
    round_store::{LeaderboardWrite, RoundLookup, RoundRecord, RoundStore, StoreError},
    run_event_logger::{NoRunEventLogger, RunEvent, RunEventLogger},
};
pub use use_cases::judge_improvement::JudgmentProtocol;
pub use use_cases::run_arena::{
    OVERALL_TIMEOUT_MESSAGE, OrchestratorError, RunArenaInput, RunArenaUseCase,
};
pub use use_cases::run_team::{ArenaPorts, RoundController, RoundError, TeamRun};
