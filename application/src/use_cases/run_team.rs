//! Round controller
//!
//! Drives one team through its rounds:
//!
//! ```text
//! Init → Running(k) → Evaluated(k) ─┬─ k <  min_rounds ─────────▶ Running(k+1)
//!                                    ├─ min ≤ k < max ─▶ Judging(k) ─┬─ continue ─▶ Running(k+1)
//!                                    │                               └─ stop ─────▶ Done
//!                                    └─ k ≥ max_rounds ─────────────────────────────▶ Done
//! ```
//!
//! Any collaborator, store or judgment failure ends the team in `Failed`;
//! nothing the team produced before the failure counts.

use crate::ports::collaborator::{CollaboratorError, Evaluator, ImprovementJudge, LeaderAgent};
use crate::ports::progress::ArenaProgressNotifier;
use crate::ports::round_store::{LeaderboardWrite, RoundRecord, RoundStore, StoreError};
use crate::ports::run_event_logger::{RunEvent, RunEventLogger};
use crate::use_cases::judge_improvement::JudgmentProtocol;
use crate::use_cases::shared::{Bounded, run_bounded};
use arena_domain::{
    DomainError, ExecutionId, ExitReason, LeaderBoardEntry, NextStep, PreviousRound,
    PromptTemplate, RoundBounds, RoundHistory, RoundState, RoundTimeouts, TeamConfig, rank_of,
};
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Why a team's round loop failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoundError {
    #[error("Leader failed in round {round}: {source}")]
    Leader {
        round: u32,
        source: CollaboratorError,
    },

    #[error("Evaluation failed in round {round}: {source}")]
    Evaluation {
        round: u32,
        source: CollaboratorError,
    },

    #[error("Judgment failed after round {round}: {source}")]
    Judgment {
        round: u32,
        source: CollaboratorError,
    },

    #[error("Store failure in round {round}: {source}")]
    Store { round: u32, source: StoreError },

    #[error("cancelled")]
    Cancelled { round: u32 },

    #[error("Team timed out after {}s", .0.as_secs())]
    TeamTimeout(Duration),

    #[error("No evaluated rounds")]
    NoRounds,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl RoundError {
    /// Round in progress when the failure happened, if known
    pub fn round(&self) -> Option<u32> {
        match self {
            RoundError::Leader { round, .. }
            | RoundError::Evaluation { round, .. }
            | RoundError::Judgment { round, .. }
            | RoundError::Store { round, .. }
            | RoundError::Cancelled { round } => Some(*round),
            RoundError::TeamTimeout(_) | RoundError::NoRounds | RoundError::Domain(_) => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RoundError::Cancelled { .. })
    }
}

/// Everything a team task talks to
#[derive(Clone)]
pub struct ArenaPorts {
    pub leader: Arc<dyn LeaderAgent>,
    pub evaluator: Arc<dyn Evaluator>,
    pub judge: Arc<dyn ImprovementJudge>,
    pub store: Arc<dyn RoundStore>,
    pub progress: Arc<dyn ArenaProgressNotifier>,
    pub events: Arc<dyn RunEventLogger>,
}

/// One team's share of an execution
#[derive(Debug, Clone)]
pub struct TeamRun {
    pub execution_id: ExecutionId,
    pub user_prompt: Arc<str>,
    pub team: TeamConfig,
    pub bounds: RoundBounds,
    pub timeouts: RoundTimeouts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundPhase {
    Init,
    Running(u32),
    Evaluated(u32),
    Judging(u32),
    Done(ExitReason),
}

pub struct RoundController {
    ports: ArenaPorts,
    judgment: JudgmentProtocol,
    cancellation: CancellationToken,
}

impl RoundController {
    pub fn new(ports: ArenaPorts, judgment_timeout: Duration, cancellation: CancellationToken) -> Self {
        let judgment = JudgmentProtocol::new(Arc::clone(&ports.judge), judgment_timeout);
        Self {
            ports,
            judgment,
            cancellation,
        }
    }

    /// Run the team to completion and return its final leaderboard entry
    pub async fn run(&self, run: &TeamRun) -> Result<LeaderBoardEntry, RoundError> {
        let mut history = RoundHistory::new();
        let mut phase = RoundPhase::Init;

        loop {
            debug!(team_id = %run.team.team_id, ?phase, "Round controller transition");
            phase = match phase {
                RoundPhase::Init => {
                    self.on_team_started(run);
                    RoundPhase::Running(1)
                }
                RoundPhase::Running(round) => {
                    let state = self.play_round(run, round, &history).await?;
                    self.persist_round(run, &state).await?;
                    self.on_round_scored(run, &state);
                    history.push(state)?;
                    RoundPhase::Evaluated(round)
                }
                RoundPhase::Evaluated(round) => match run.bounds.next_step(round) {
                    NextStep::ContinueUnconditionally => RoundPhase::Running(round + 1),
                    NextStep::Judge => RoundPhase::Judging(round),
                    NextStep::Finish(reason) => RoundPhase::Done(reason),
                },
                RoundPhase::Judging(round) => {
                    if self.judge_round(run, round, &mut history).await? {
                        RoundPhase::Running(round + 1)
                    } else {
                        RoundPhase::Done(ExitReason::NoImprovementExpected)
                    }
                }
                RoundPhase::Done(reason) => return self.finish(run, &history, reason).await,
            };
        }
    }

    /// Running(k): leader then evaluator, each bounded by the submission timeout
    async fn play_round(
        &self,
        run: &TeamRun,
        round: u32,
        history: &RoundHistory,
    ) -> Result<RoundState, RoundError> {
        let task = self.task_description(run, round, history).await?;
        let started_at = Utc::now();
        let limit = Some(run.timeouts.submission);

        let output = match run_bounded(
            &self.cancellation,
            limit,
            self.ports.leader.run(&run.team, &task),
        )
        .await
        {
            Bounded::Done(result) => {
                result.map_err(|source| RoundError::Leader { round, source })?
            }
            Bounded::TimedOut => {
                return Err(RoundError::Leader {
                    round,
                    source: CollaboratorError::Timeout(run.timeouts.submission),
                });
            }
            Bounded::Cancelled => return Err(RoundError::Cancelled { round }),
        };

        let evaluation = match run_bounded(
            &self.cancellation,
            limit,
            self.ports.evaluator.evaluate(&run.user_prompt, &output.content),
        )
        .await
        {
            Bounded::Done(result) => {
                result.map_err(|source| RoundError::Evaluation { round, source })?
            }
            Bounded::TimedOut => {
                return Err(RoundError::Evaluation {
                    round,
                    source: CollaboratorError::Timeout(run.timeouts.submission),
                });
            }
            Bounded::Cancelled => return Err(RoundError::Cancelled { round }),
        };

        let state = RoundState::new(round, output.content, evaluation, started_at, Utc::now())?
            .with_usage(output.usage)
            .with_message_history(output.message_history);
        Ok(state)
    }

    async fn task_description(
        &self,
        run: &TeamRun,
        round: u32,
        history: &RoundHistory,
    ) -> Result<String, RoundError> {
        let instructions = run.team.instructions.as_deref();
        let (Some(previous), Some(best)) = (history.latest(), history.best()) else {
            return Ok(PromptTemplate::leader_initial_task(&run.user_prompt, instructions));
        };

        let rank = match self
            .cancellable(round, self.ports.store.get_ranking(&run.execution_id))
            .await?
        {
            Ok(rankings) => rank_of(&rankings, &run.team.team_id),
            Err(e) => {
                warn!(team_id = %run.team.team_id, round, "Ranking unavailable: {}", e);
                None
            }
        };

        let feedback = previous.evaluation().feedback();
        let context = PreviousRound {
            round_number: previous.round_number(),
            score: previous.score().value(),
            best_score: best.score().value(),
            submission: previous.submission(),
            feedback: &feedback,
            rank,
        };
        Ok(PromptTemplate::leader_improvement_task(
            &run.user_prompt,
            round,
            &context,
            instructions,
        ))
    }

    /// Evaluated(k): durable round record plus a live, non-final leaderboard row
    async fn persist_round(&self, run: &TeamRun, state: &RoundState) -> Result<(), RoundError> {
        let round = state.round_number();
        let record = RoundRecord::new(run.team.team_name.clone(), state.clone());
        self.cancellable(
            round,
            self.ports
                .store
                .save_round(&run.execution_id, &run.team.team_id, round, &record),
        )
        .await?
        .map_err(|source| RoundError::Store { round, source })?;

        let row = LeaderboardWrite::from_round(
            &run.execution_id,
            &run.team.team_id,
            &run.team.team_name,
            state,
        );
        self.cancellable(round, self.ports.store.save_to_leaderboard(&row))
            .await?
            .map(|_| ())
            .map_err(|source| RoundError::Store { round, source })
    }

    /// Judging(k): returns whether to run another round
    async fn judge_round(
        &self,
        run: &TeamRun,
        round: u32,
        history: &mut RoundHistory,
    ) -> Result<bool, RoundError> {
        let context =
            JudgmentProtocol::build_context(&run.user_prompt, &run.team, run.bounds, history);
        let judgment = self
            .cancellable(round, self.judgment.decide(&context))
            .await?
            .map_err(|source| RoundError::Judgment { round, source })?;

        let should_continue = judgment.should_continue();
        info!(
            team_id = %run.team.team_id,
            round,
            should_continue,
            confidence = judgment.confidence(),
            "Improvement judgment"
        );
        self.ports
            .progress
            .on_judgment(&run.team.team_id, round, should_continue);
        self.ports.events.log(RunEvent::Judgment {
            team_id: run.team.team_id.clone(),
            round,
            should_continue,
            confidence: judgment.confidence(),
            reasoning: judgment.reasoning().to_string(),
        });

        let latest = history.latest().cloned().ok_or(RoundError::NoRounds)?;
        let judged = latest.with_judgment(judgment);
        let record = RoundRecord::new(run.team.team_name.clone(), judged.clone());
        self.cancellable(
            round,
            self.ports
                .store
                .save_round(&run.execution_id, &run.team.team_id, round, &record),
        )
        .await?
        .map_err(|source| RoundError::Store { round, source })?;
        history.replace_latest(judged)?;

        Ok(should_continue)
    }

    /// Done: publish the best round as the team's final submission
    async fn finish(
        &self,
        run: &TeamRun,
        history: &RoundHistory,
        reason: ExitReason,
    ) -> Result<LeaderBoardEntry, RoundError> {
        let best = history.best().ok_or(RoundError::NoRounds)?;
        let round = best.round_number();
        let write = LeaderboardWrite::from_round(
            &run.execution_id,
            &run.team.team_id,
            &run.team.team_name,
            best,
        )
        .into_final(reason);

        // The stored row carries the created_at the leaderboard ranks ties by
        let entry = self
            .cancellable(round, self.ports.store.save_to_leaderboard(&write))
            .await?
            .map_err(|source| RoundError::Store { round, source })?;

        info!(
            team_id = %run.team.team_id,
            best_round = round,
            score = best.score().value(),
            rounds = history.len(),
            exit_reason = %reason,
            "Team finished"
        );
        self.ports
            .progress
            .on_team_finished(&run.team.team_id, best.score().value(), reason);
        self.ports.events.log(RunEvent::TeamFinished {
            team_id: run.team.team_id.clone(),
            best_round: round,
            score: best.score().value(),
            rounds: history.len(),
            exit_reason: reason,
        });

        Ok(entry)
    }

    /// Await `future` unless the team is cancelled first
    async fn cancellable<F: Future>(&self, round: u32, future: F) -> Result<F::Output, RoundError> {
        match run_bounded(&self.cancellation, None, future).await {
            Bounded::Done(value) => Ok(value),
            Bounded::TimedOut | Bounded::Cancelled => Err(RoundError::Cancelled { round }),
        }
    }

    fn on_team_started(&self, run: &TeamRun) {
        info!(
            execution_id = %run.execution_id,
            team_id = %run.team.team_id,
            min_rounds = run.bounds.min_rounds(),
            max_rounds = run.bounds.max_rounds(),
            "Team started"
        );
        self.ports
            .progress
            .on_team_start(&run.team.team_id, &run.team.team_name);
        self.ports.events.log(RunEvent::TeamStarted {
            team_id: run.team.team_id.clone(),
            team_name: run.team.team_name.clone(),
        });
    }

    fn on_round_scored(&self, run: &TeamRun, state: &RoundState) {
        let score = state.score().value();
        info!(
            team_id = %run.team.team_id,
            round = state.round_number(),
            score,
            duration_ms = state.duration_ms(),
            "Round scored"
        );
        self.ports
            .progress
            .on_round_complete(&run.team.team_id, state.round_number(), score);
        self.ports.events.log(RunEvent::RoundScored {
            team_id: run.team.team_id.clone(),
            round: state.round_number(),
            score,
            input_tokens: state.usage().input_tokens,
            output_tokens: state.usage().output_tokens,
            duration_ms: state.duration_ms(),
        });
    }
}
