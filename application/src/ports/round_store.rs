//! Round store port
//!
//! Durable persistence of per-round records and the leaderboard, shared by
//! every team of an execution. Implementations own their retry policy:
//! callers must not wrap writes in their own retry loop.

use arena_domain::{
    ExecutionId, ExitReason, LeaderBoardEntry, RoundState, Score, TeamId, TeamRanking,
};
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by the store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// A write did not commit; retries (if any) are exhausted
    #[error("Database write failed for {operation} after {retries} retries ({attempts} attempts): {message}")]
    DatabaseWrite {
        operation: &'static str,
        attempts: u32,
        retries: u32,
        message: String,
    },

    /// A write failed for a reason retrying cannot fix; attempted once
    #[error("Database write rejected for {operation}: {message}")]
    WriteRejected {
        operation: &'static str,
        message: String,
    },

    /// A read failed for a reason other than absence
    #[error("Database read failed for {operation}: {message}")]
    DatabaseRead {
        operation: &'static str,
        message: String,
    },

    /// The record violates a storage invariant and was not written
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn write_exhausted(operation: &'static str, attempts: u32, message: impl Into<String>) -> Self {
        StoreError::DatabaseWrite {
            operation,
            attempts,
            retries: attempts.saturating_sub(1),
            message: message.into(),
        }
    }

    pub fn rejected(operation: &'static str, message: impl Into<String>) -> Self {
        StoreError::WriteRejected {
            operation,
            message: message.into(),
        }
    }

    pub fn read(operation: &'static str, message: impl Into<String>) -> Self {
        StoreError::DatabaseRead {
            operation,
            message: message.into(),
        }
    }
}

/// Full record of one round as persisted in the round history
#[derive(Debug, Clone, PartialEq)]
pub struct RoundRecord {
    pub team_name: String,
    pub state: RoundState,
}

impl RoundRecord {
    pub fn new(team_name: impl Into<String>, state: RoundState) -> Self {
        Self {
            team_name: team_name.into(),
            state,
        }
    }
}

/// Outcome of a point lookup; absence is an expected state, not an error
#[derive(Debug, Clone, PartialEq)]
pub enum RoundLookup {
    Found(RoundRecord),
    NotFound,
}

impl RoundLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, RoundLookup::Found(_))
    }

    pub fn into_option(self) -> Option<RoundRecord> {
        match self {
            RoundLookup::Found(record) => Some(record),
            RoundLookup::NotFound => None,
        }
    }
}

/// Arguments of a leaderboard upsert
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardWrite {
    pub execution_id: ExecutionId,
    pub team_id: TeamId,
    pub team_name: String,
    pub round_number: u32,
    pub submission_content: String,
    pub score: Score,
    pub score_details: serde_json::Value,
    pub final_submission: bool,
    pub exit_reason: Option<ExitReason>,
}

impl LeaderboardWrite {
    /// Leaderboard row for a round, not yet final
    pub fn from_round(
        execution_id: &ExecutionId,
        team_id: &TeamId,
        team_name: &str,
        state: &RoundState,
    ) -> Self {
        Self {
            execution_id: execution_id.clone(),
            team_id: team_id.clone(),
            team_name: team_name.to_string(),
            round_number: state.round_number(),
            submission_content: state.submission().to_string(),
            score: state.score(),
            score_details: state.evaluation().score_details(),
            final_submission: false,
            exit_reason: None,
        }
    }

    pub fn into_final(mut self, exit_reason: ExitReason) -> Self {
        self.final_submission = true;
        self.exit_reason = Some(exit_reason);
        self
    }
}

/// Persistence shared by all teams of an execution
///
/// Every write is an upsert keyed by `(execution_id, team_id, round_number)`
/// and commits atomically or not at all. Reads never wait for writers.
#[async_trait]
pub trait RoundStore: Send + Sync {
    async fn save_round(
        &self,
        execution_id: &ExecutionId,
        team_id: &TeamId,
        round_number: u32,
        record: &RoundRecord,
    ) -> Result<(), StoreError>;

    async fn load_round(
        &self,
        execution_id: &ExecutionId,
        team_id: &TeamId,
        round_number: u32,
    ) -> Result<RoundLookup, StoreError>;

    /// Every persisted round of a team, ascending by round number
    async fn load_team_rounds(
        &self,
        execution_id: &ExecutionId,
        team_id: &TeamId,
    ) -> Result<Vec<RoundRecord>, StoreError>;

    /// Upsert a leaderboard row and return it as stored
    ///
    /// `created_at` is the time of the first write for the key and survives
    /// later upserts. A retired team's rows are refused with `InvalidRecord`.
    async fn save_to_leaderboard(
        &self,
        entry: &LeaderboardWrite,
    ) -> Result<LeaderBoardEntry, StoreError>;

    /// Withdraw a failed team from an execution's leaderboard
    ///
    /// Deletes every leaderboard row of the team and refuses its later
    /// leaderboard writes, in one transaction. Round history is kept.
    async fn retire_team(
        &self,
        execution_id: &ExecutionId,
        team_id: &TeamId,
    ) -> Result<(), StoreError>;

    /// Best row per team, best first, at most `limit` rows
    async fn get_leaderboard(
        &self,
        execution_id: &ExecutionId,
        limit: usize,
    ) -> Result<Vec<LeaderBoardEntry>, StoreError>;

    /// Live standings of every team with at least one round
    async fn get_ranking(&self, execution_id: &ExecutionId) -> Result<Vec<TeamRanking>, StoreError>;
}
