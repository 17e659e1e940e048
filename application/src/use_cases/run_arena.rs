//! Run Arena use case
//!
//! Fans one user prompt out to every configured team, runs each team's
//! round loop as an independent task, and ranks the survivors.
//!
//! Failure of one team never affects another: a team that errors, times
//! out, panics or is cancelled becomes a [`FailedTeamInfo`], is retired
//! from the stored leaderboard, and the execution carries on.

use crate::config::ExecutionParams;
use crate::ports::run_event_logger::RunEvent;
use crate::use_cases::run_team::{ArenaPorts, RoundController, RoundError, TeamRun};
use crate::use_cases::shared::panic_message;
use arena_domain::{
    DomainError, ExecutionId, ExecutionSummary, FailedTeamInfo, LeaderBoardEntry,
    OrchestratorTask, TeamConfig, sort_leaderboard,
};
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{Id, JoinError, JoinSet};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Reported for every team still running when the overall timeout fires
pub const OVERALL_TIMEOUT_MESSAGE: &str = "cancelled by overall timeout";

/// Errors that abort an execution before any team runs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrchestratorError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] DomainError),
}

/// Input for the RunArena use case
#[derive(Debug, Clone)]
pub struct RunArenaInput {
    pub user_prompt: String,
    pub teams: Vec<TeamConfig>,
    /// Generated when absent
    pub execution_id: Option<ExecutionId>,
}

impl RunArenaInput {
    pub fn new(user_prompt: impl Into<String>, teams: Vec<TeamConfig>) -> Self {
        Self {
            user_prompt: user_prompt.into(),
            teams,
            execution_id: None,
        }
    }

    pub fn with_execution_id(mut self, execution_id: ExecutionId) -> Self {
        self.execution_id = Some(execution_id);
        self
    }
}

/// Why the collection loop stopped waiting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interruption {
    OverallTimeout,
    Cancelled,
}

impl Interruption {
    fn message(self) -> &'static str {
        match self {
            Interruption::OverallTimeout => OVERALL_TIMEOUT_MESSAGE,
            Interruption::Cancelled => "cancelled",
        }
    }
}

type TeamResult = Result<LeaderBoardEntry, RoundError>;

/// Use case for running every team of an execution
pub struct RunArenaUseCase {
    ports: ArenaPorts,
    params: ExecutionParams,
}

impl RunArenaUseCase {
    pub fn new(ports: ArenaPorts, params: ExecutionParams) -> Self {
        Self { ports, params }
    }

    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }

    /// Execute without external cancellation
    pub async fn execute(&self, input: RunArenaInput) -> Result<ExecutionSummary, OrchestratorError> {
        self.execute_with_cancellation(input, CancellationToken::new())
            .await
    }

    /// Execute; cancelling `cancellation` stops every team like the overall timeout does
    pub async fn execute_with_cancellation(
        &self,
        input: RunArenaInput,
        cancellation: CancellationToken,
    ) -> Result<ExecutionSummary, OrchestratorError> {
        let execution_id = input.execution_id.unwrap_or_else(ExecutionId::generate);
        let task = OrchestratorTask::new(
            execution_id,
            input.user_prompt,
            input.teams,
            self.params.bounds,
            self.params.timeouts,
        )?;
        let started_at = Utc::now();

        info!(
            execution_id = %task.execution_id(),
            teams = task.teams().len(),
            min_rounds = task.bounds().min_rounds(),
            max_rounds = task.bounds().max_rounds(),
            "Starting execution"
        );
        self.ports.progress.on_execution_start(task.teams().len());
        self.ports.events.log(RunEvent::ExecutionStarted {
            execution_id: task.execution_id().clone(),
            teams: task.teams().len(),
            min_rounds: task.bounds().min_rounds(),
            max_rounds: task.bounds().max_rounds(),
        });

        let token = cancellation.child_token();
        let (mut successes, mut failures) = self.run_teams(&task, &token).await;

        // Keep the reported order stable regardless of completion order
        let position: HashMap<&str, usize> = task
            .teams()
            .iter()
            .enumerate()
            .map(|(index, team)| (team.team_id.as_str(), index))
            .collect();
        failures.sort_by_key(|failed| position.get(failed.team_id.as_str()).copied());

        successes = self.rank(&task, successes).await;
        let summary = ExecutionSummary::new(
            task.execution_id().clone(),
            task.user_prompt(),
            successes,
            failures,
            started_at,
            Utc::now(),
        );

        info!(
            execution_id = %summary.execution_id,
            succeeded = summary.succeeded,
            failed = summary.failed,
            best_team = summary.best.as_ref().map(|b| b.team_id.as_str()),
            "Execution finished"
        );
        self.ports.events.log(RunEvent::ExecutionFinished {
            execution_id: summary.execution_id.clone(),
            succeeded: summary.succeeded,
            failed: summary.failed,
            best_team: summary.best.as_ref().map(|b| b.team_id.clone()),
            best_score: summary.best.as_ref().map(|b| b.score.value()),
            duration_ms: summary.duration_ms(),
        });
        self.ports.progress.on_execution_complete();

        Ok(summary)
    }

    /// Spawn one task per team and collect every outcome
    async fn run_teams(
        &self,
        task: &OrchestratorTask,
        token: &CancellationToken,
    ) -> (Vec<LeaderBoardEntry>, Vec<FailedTeamInfo>) {
        let user_prompt: Arc<str> = Arc::from(task.user_prompt());
        let timeouts = task.timeouts();
        let mut join_set: JoinSet<TeamResult> = JoinSet::new();
        let mut pending: HashMap<Id, TeamConfig> = HashMap::new();

        for team in task.teams() {
            let controller =
                RoundController::new(self.ports.clone(), timeouts.judgment, token.clone());
            let run = TeamRun {
                execution_id: task.execution_id().clone(),
                user_prompt: Arc::clone(&user_prompt),
                team: team.clone(),
                bounds: task.bounds(),
                timeouts,
            };

            let handle = join_set.spawn(async move {
                match tokio::time::timeout(run.timeouts.team, controller.run(&run)).await {
                    Ok(result) => result,
                    Err(_) => Err(RoundError::TeamTimeout(run.timeouts.team)),
                }
            });
            pending.insert(handle.id(), team.clone());
        }

        let mut successes = Vec::new();
        let mut failures = Vec::new();
        let deadline = self.params.overall_timeout.map(|limit| Instant::now() + limit);

        let interruption = loop {
            let joined = tokio::select! {
                biased;
                _ = token.cancelled() => break Some(Interruption::Cancelled),
                _ = sleep_until_deadline(deadline) => break Some(Interruption::OverallTimeout),
                joined = join_set.join_next_with_id() => joined,
            };
            let Some(joined) = joined else {
                break None;
            };
            self.record(
                task.execution_id(),
                joined,
                &mut pending,
                None,
                &mut successes,
                &mut failures,
            )
            .await;
        };

        if let Some(interruption) = interruption {
            warn!(
                execution_id = %task.execution_id(),
                still_running = pending.len(),
                reason = interruption.message(),
                "Stopping remaining teams"
            );
            token.cancel();

            // Let tasks observe cancellation before aborting the stragglers
            let grace_deadline = Instant::now() + self.params.cancel_grace;
            loop {
                let joined = tokio::select! {
                    _ = tokio::time::sleep_until(grace_deadline) => break,
                    joined = join_set.join_next_with_id() => joined,
                };
                let Some(joined) = joined else {
                    break;
                };
                self.record(
                    task.execution_id(),
                    joined,
                    &mut pending,
                    Some(interruption),
                    &mut successes,
                    &mut failures,
                )
                .await;
            }
            join_set.abort_all();
            while join_set.join_next().await.is_some() {}

            let mut stragglers: Vec<TeamConfig> = pending.drain().map(|(_, team)| team).collect();
            stragglers.sort_by(|a, b| a.team_id.cmp(&b.team_id));
            for team in stragglers {
                let failed = FailedTeamInfo::new(
                    team.team_id.clone(),
                    team.team_name.clone(),
                    interruption.message(),
                );
                self.report_failure(task.execution_id(), &failed).await;
                failures.push(failed);
            }
        }

        (successes, failures)
    }

    /// File one joined task under success or failure
    async fn record(
        &self,
        execution_id: &ExecutionId,
        joined: Result<(Id, TeamResult), JoinError>,
        pending: &mut HashMap<Id, TeamConfig>,
        interruption: Option<Interruption>,
        successes: &mut Vec<LeaderBoardEntry>,
        failures: &mut Vec<FailedTeamInfo>,
    ) {
        let (id, outcome) = match joined {
            Ok((id, Ok(entry))) => (id, Ok(entry)),
            Ok((id, Err(error))) => (id, Err((error.round(), failure_message(&error, interruption)))),
            Err(join_error) => {
                let id = join_error.id();
                (id, Err((None, join_failure_message(join_error, interruption))))
            }
        };
        let Some(team) = pending.remove(&id) else {
            warn!(task_id = %id, "Joined a task with no team attached");
            return;
        };

        match outcome {
            Ok(entry) => successes.push(entry),
            Err((round, message)) => {
                let mut failed = FailedTeamInfo::new(team.team_id, team.team_name, message);
                if let Some(round) = round {
                    failed = failed.in_round(round);
                }
                self.report_failure(execution_id, &failed).await;
                failures.push(failed);
            }
        }
    }

    /// Announce a failed team and take it off the stored leaderboard
    async fn report_failure(&self, execution_id: &ExecutionId, failed: &FailedTeamInfo) {
        warn!(
            execution_id = %execution_id,
            team_id = %failed.team_id,
            round = failed.failed_round,
            "Team failed: {}",
            failed.error
        );
        self.ports
            .progress
            .on_team_failed(&failed.team_id, &failed.error);
        self.ports.events.log(RunEvent::TeamFailed {
            team_id: failed.team_id.clone(),
            round: failed.failed_round,
            error: failed.error.clone(),
        });

        if let Err(e) = self
            .ports
            .store
            .retire_team(execution_id, &failed.team_id)
            .await
        {
            warn!(
                execution_id = %execution_id,
                team_id = %failed.team_id,
                "Could not retire failed team from the leaderboard: {}", e
            );
        }
    }

    /// Order successes by the stored leaderboard, or in memory if that read fails
    async fn rank(
        &self,
        task: &OrchestratorTask,
        mut successes: Vec<LeaderBoardEntry>,
    ) -> Vec<LeaderBoardEntry> {
        if successes.is_empty() {
            return successes;
        }

        let succeeded: HashSet<String> = successes
            .iter()
            .map(|entry| entry.team_id.to_string())
            .collect();
        let limit = self.params.leaderboard_limit.max(task.teams().len());

        match self
            .ports
            .store
            .get_leaderboard(task.execution_id(), limit)
            .await
        {
            Ok(rows) => {
                // A team whose retirement failed can still own rows
                let ranked: Vec<LeaderBoardEntry> = rows
                    .into_iter()
                    .filter(|row| succeeded.contains(row.team_id.as_str()))
                    .collect();
                if ranked.len() == successes.len() {
                    return ranked;
                }
                warn!(
                    execution_id = %task.execution_id(),
                    stored = ranked.len(),
                    expected = successes.len(),
                    "Stored leaderboard incomplete, ranking in memory"
                );
            }
            Err(e) => {
                warn!(
                    execution_id = %task.execution_id(),
                    "Leaderboard read failed, ranking in memory: {}", e
                );
            }
        }

        sort_leaderboard(&mut successes);
        successes
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn failure_message(error: &RoundError, interruption: Option<Interruption>) -> String {
    match interruption {
        Some(interruption) if error.is_cancelled() => interruption.message().to_string(),
        _ => error.to_string(),
    }
}

/// Panics keep their payload text; aborted tasks count as interrupted
fn join_failure_message(join_error: JoinError, interruption: Option<Interruption>) -> String {
    if join_error.is_panic() {
        let payload = join_error.into_panic();
        return format!("task panicked: {}", panic_message(payload.as_ref()));
    }
    match interruption {
        Some(interruption) => interruption.message().to_string(),
        None => join_error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::round_store::{LeaderboardWrite, RoundStore, StoreError};
    use crate::use_cases::test_support::{
        MemoryRoundStore, MockEvaluator, MockJudge, MockLeader, RecordingEvents,
        RecordingProgress, evaluated_round, ports_with,
    };
    use arena_domain::{ExitReason, RoundBounds, RoundTimeouts, TeamId};
    use std::time::Duration;

    fn team(id: &str) -> TeamConfig {
        TeamConfig::new(TeamId::new(id).unwrap())
    }

    fn params(min: u32, max: u32) -> ExecutionParams {
        ExecutionParams::default()
            .with_bounds(RoundBounds::new(min, max).unwrap())
            .with_timeouts(RoundTimeouts {
                submission: Duration::from_secs(30),
                judgment: Duration::from_secs(30),
                team: Duration::from_secs(600),
            })
            .with_overall_timeout(Some(Duration::from_secs(3600)))
            .with_cancel_grace(Duration::from_millis(100))
    }

    fn input(teams: &[&str]) -> RunArenaInput {
        RunArenaInput::new("design a logo", teams.iter().map(|id| team(id)).collect())
            .with_execution_id(ExecutionId::new("exec-arena"))
    }

    fn use_case(
        leader: MockLeader,
        evaluator: MockEvaluator,
        store: Arc<MemoryRoundStore>,
        params: ExecutionParams,
    ) -> RunArenaUseCase {
        let ports = ports_with(
            Arc::new(leader),
            Arc::new(evaluator),
            Arc::new(MockJudge::default()),
            store,
        );
        RunArenaUseCase::new(ports, params)
    }

    #[tokio::test]
    async fn test_duplicate_team_rejected_before_any_work() {
        let store = Arc::new(MemoryRoundStore::default());
        let use_case = use_case(
            MockLeader::default(),
            MockEvaluator::new(50.0),
            store.clone(),
            params(1, 1),
        );

        let error = use_case
            .execute(input(&["alpha", "beta", "alpha"]))
            .await
            .unwrap_err();

        assert_eq!(
            error,
            OrchestratorError::Configuration(DomainError::DuplicateTeam("alpha".to_string()))
        );
        assert_eq!(store.total_rounds(), 0);
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected() {
        let use_case = use_case(
            MockLeader::default(),
            MockEvaluator::new(50.0),
            Arc::new(MemoryRoundStore::default()),
            params(1, 1),
        );

        let error = use_case
            .execute(RunArenaInput::new("   ", vec![team("alpha")]))
            .await
            .unwrap_err();

        assert_eq!(error, OrchestratorError::Configuration(DomainError::EmptyPrompt));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_ten_teams_five_rounds_persist_fifty_records() {
        let store = Arc::new(MemoryRoundStore::default());
        let ids: Vec<String> = (0..10).map(|i| format!("team-{i:02}")).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let use_case = use_case(
            MockLeader::default(),
            MockEvaluator::new(50.0),
            store.clone(),
            params(5, 5),
        );

        let summary = use_case.execute(input(&id_refs)).await.unwrap();

        assert_eq!(summary.succeeded, 10);
        assert_eq!(summary.failed, 0);
        assert_eq!(store.total_rounds(), 50);
        for id in &ids {
            assert_eq!(
                store.rounds_for(&ExecutionId::new("exec-arena"), id),
                vec![1, 2, 3, 4, 5]
            );
        }
        assert!(
            summary
                .results
                .iter()
                .all(|entry| entry.exit_reason == Some(ExitReason::MaxRoundsReached))
        );
    }

    #[tokio::test]
    async fn test_best_team_across_execution() {
        let evaluator = MockEvaluator::new(40.0)
            .score_for("beta:round2", 88.0)
            .score_for("gamma:round1", 70.0);
        let use_case = use_case(
            MockLeader::default(),
            evaluator,
            Arc::new(MemoryRoundStore::default()),
            params(2, 2),
        );

        let summary = use_case
            .execute(input(&["alpha", "beta", "gamma"]))
            .await
            .unwrap();

        let best = summary.best.unwrap();
        assert_eq!(best.team_id.as_str(), "beta");
        assert_eq!(best.round_number, 2);
        let order: Vec<&str> = summary.results.iter().map(|e| e.team_id.as_str()).collect();
        assert_eq!(order, vec!["beta", "gamma", "alpha"]);
    }

    #[tokio::test]
    async fn test_failing_team_does_not_affect_others() {
        let store = Arc::new(MemoryRoundStore::default());
        let use_case = use_case(
            MockLeader::default().failing_in_round("beta", 2),
            MockEvaluator::new(60.0).score_for("beta:round1", 99.0),
            store.clone(),
            params(3, 3),
        );

        let summary = use_case
            .execute(input(&["alpha", "beta", "gamma"]))
            .await
            .unwrap();

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        let failed = &summary.failed_teams[0];
        assert_eq!(failed.team_id.as_str(), "beta");
        assert_eq!(failed.failed_round, Some(2));
        assert!(failed.error.contains("leader down in round 2"));

        // beta's high-scoring round 1 never reaches the results
        assert!(summary.results.iter().all(|e| e.team_id.as_str() != "beta"));
        assert_eq!(store.rounds_for(&ExecutionId::new("exec-arena"), "alpha").len(), 3);
        assert_eq!(store.rounds_for(&ExecutionId::new("exec-arena"), "beta"), vec![1]);

        // ...nor the stored leaderboard or ranking
        let exec = ExecutionId::new("exec-arena");
        assert_eq!(store.leaderboard_teams(&exec), vec!["alpha", "gamma"]);
        let board = store.get_leaderboard(&exec, 10).await.unwrap();
        assert!(board.iter().all(|e| e.team_id.as_str() != "beta"));
        let ranking = store.get_ranking(&exec).await.unwrap();
        assert_eq!(ranking.len(), 2);
    }

    #[tokio::test]
    async fn test_panicking_team_becomes_failure() {
        let use_case = use_case(
            MockLeader::default().panicking_for("beta"),
            MockEvaluator::new(60.0),
            Arc::new(MemoryRoundStore::default()),
            params(1, 1),
        );

        let summary = use_case.execute(input(&["alpha", "beta"])).await.unwrap();

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed_teams.len(), 1);
        assert!(summary.failed_teams[0].error.contains("task panicked"));
        assert!(summary.failed_teams[0].error.contains("leader exploded for beta"));
    }

    #[tokio::test]
    async fn test_all_teams_failing_still_yields_summary() {
        let use_case = use_case(
            MockLeader::default()
                .failing_in_round("alpha", 1)
                .failing_in_round("beta", 1),
            MockEvaluator::new(60.0),
            Arc::new(MemoryRoundStore::default()),
            params(1, 1),
        );

        let summary = use_case.execute(input(&["alpha", "beta"])).await.unwrap();

        assert!(summary.all_failed());
        assert!(summary.best.is_none());
        assert_eq!(summary.total_teams, 2);
        let order: Vec<&str> = summary
            .failed_teams
            .iter()
            .map(|f| f.team_id.as_str())
            .collect();
        assert_eq!(order, vec!["alpha", "beta"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overall_timeout_cancels_slow_teams() {
        let params = params(1, 1).with_overall_timeout(Some(Duration::from_secs(10)));
        let use_case = use_case(
            MockLeader::default().with_delay("slow", Duration::from_secs(25)),
            MockEvaluator::new(60.0),
            Arc::new(MemoryRoundStore::default()),
            params,
        );

        let summary = use_case.execute(input(&["fast", "slow"])).await.unwrap();

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.results[0].team_id.as_str(), "fast");
        assert_eq!(summary.failed_teams[0].team_id.as_str(), "slow");
        assert_eq!(summary.failed_teams[0].error, OVERALL_TIMEOUT_MESSAGE);
    }

    #[tokio::test]
    async fn test_failed_team_rows_removed_from_stored_leaderboard() {
        let store = Arc::new(MemoryRoundStore::default());
        let use_case = use_case(
            MockLeader::default().failing_in_round("beta", 2),
            MockEvaluator::new(40.0).score_for("beta:round1", 99.0),
            store.clone(),
            params(2, 2),
        );

        let summary = use_case.execute(input(&["alpha", "beta"])).await.unwrap();

        assert_eq!(summary.failed_teams[0].team_id.as_str(), "beta");
        let exec = ExecutionId::new("exec-arena");
        let board = store.get_leaderboard(&exec, 10).await.unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].team_id.as_str(), "alpha");
        assert!(board[0].final_submission);

        // A late write from the failed team cannot bring it back
        let late = LeaderboardWrite::from_round(
            &exec,
            &TeamId::new("beta").unwrap(),
            "beta",
            &evaluated_round(1, "beta:round1", 99.0),
        );
        assert!(matches!(
            store.save_to_leaderboard(&late).await,
            Err(StoreError::InvalidRecord(_))
        ));
        assert_eq!(store.leaderboard_teams(&exec), vec!["alpha"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_per_team_timeout() {
        let params = params(1, 1).with_timeouts(RoundTimeouts {
            submission: Duration::from_secs(120),
            judgment: Duration::from_secs(30),
            team: Duration::from_secs(30),
        });
        let use_case = use_case(
            MockLeader::default().with_delay("slow", Duration::from_secs(60)),
            MockEvaluator::new(60.0),
            Arc::new(MemoryRoundStore::default()),
            params,
        );

        let summary = use_case.execute(input(&["fast", "slow"])).await.unwrap();

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed_teams[0].error, "Team timed out after 30s");
    }

    #[tokio::test]
    async fn test_external_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let use_case = use_case(
            MockLeader::default(),
            MockEvaluator::new(60.0),
            Arc::new(MemoryRoundStore::default()),
            params(1, 1),
        );

        let summary = use_case
            .execute_with_cancellation(input(&["alpha"]), token)
            .await
            .unwrap();

        assert!(summary.all_failed());
        assert_eq!(summary.failed_teams[0].error, "cancelled");
    }

    #[tokio::test]
    async fn test_leaderboard_read_failure_falls_back_to_memory() {
        let evaluator = MockEvaluator::new(30.0).score_for("beta:round1", 80.0);
        let use_case = use_case(
            MockLeader::default(),
            evaluator,
            Arc::new(MemoryRoundStore::default().failing_reads()),
            params(1, 1),
        );

        let summary = use_case.execute(input(&["alpha", "beta"])).await.unwrap();

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.best.unwrap().team_id.as_str(), "beta");
    }

    #[tokio::test]
    async fn test_progress_and_events_reported() {
        let progress = Arc::new(RecordingProgress::default());
        let events = Arc::new(RecordingEvents::default());
        let mut ports = ports_with(
            Arc::new(MockLeader::default().failing_in_round("beta", 1)),
            Arc::new(MockEvaluator::new(60.0)),
            Arc::new(MockJudge::default()),
            Arc::new(MemoryRoundStore::default()),
        );
        ports.progress = progress.clone();
        ports.events = events.clone();
        let use_case = RunArenaUseCase::new(ports, params(1, 1));

        use_case.execute(input(&["alpha", "beta"])).await.unwrap();

        let seen = progress.events();
        assert_eq!(seen.first().map(String::as_str), Some("start:2"));
        assert_eq!(seen.last().map(String::as_str), Some("complete"));
        assert!(seen.contains(&"round:alpha:1".to_string()));
        assert!(seen.contains(&"finished:alpha:max rounds reached".to_string()));
        assert!(seen.contains(&"failed:beta".to_string()));

        let types = events.types();
        assert_eq!(types.first(), Some(&"execution_started"));
        assert!(types.contains(&"team_started"));
        assert!(types.contains(&"round_scored"));
        assert!(types.contains(&"team_finished"));
        assert!(types.contains(&"team_failed"));
        assert_eq!(types.last(), Some(&"execution_finished"));
        assert!(events.events().iter().any(|event| matches!(
            event,
            RunEvent::TeamFailed { team_id, round: Some(1), error }
                if team_id.as_str() == "beta" && error.contains("leader down")
        )));
    }
}
