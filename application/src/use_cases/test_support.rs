//! Scripted ports shared by use case tests

use crate::ports::collaborator::{
    CollaboratorError, Evaluator, ImprovementJudge, LeaderAgent, LeaderOutput,
};
use crate::ports::progress::{ArenaProgressNotifier, NoProgress};
use crate::ports::round_store::{
    LeaderboardWrite, RoundLookup, RoundRecord, RoundStore, StoreError,
};
use crate::ports::run_event_logger::{NoRunEventLogger, RunEvent, RunEventLogger};
use crate::use_cases::run_team::ArenaPorts;
use arena_domain::{
    EvaluationResult, ExecutionId, ExitReason, ImprovementJudgment, JudgmentContext,
    LeaderBoardEntry, MetricScore, RoundState, Score, TeamConfig, TeamId, TeamRanking,
    TokenUsage, leaderboard_order, sort_leaderboard,
};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::Arc;
use std::time::Duration;

pub(crate) fn ports_with(
    leader: Arc<dyn LeaderAgent>,
    evaluator: Arc<dyn Evaluator>,
    judge: Arc<dyn ImprovementJudge>,
    store: Arc<dyn RoundStore>,
) -> ArenaPorts {
    ArenaPorts {
        leader,
        evaluator,
        judge,
        store,
        progress: Arc::new(NoProgress),
        events: Arc::new(NoRunEventLogger),
    }
}

pub(crate) fn evaluated_round(round: u32, submission: &str, score: f64) -> RoundState {
    let now = Utc::now();
    let evaluation = EvaluationResult::new(Score::new(score).unwrap())
        .with_metric(MetricScore::new("quality", score, "reads well"));
    RoundState::new(round, submission, evaluation, now, now).unwrap()
}

// ==================== Leader ====================

/// Answers `"{team_id}:round{n}"`, counting calls per team
#[derive(Default)]
pub(crate) struct MockLeader {
    delays: HashMap<String, Duration>,
    panics: HashSet<String>,
    failures: HashMap<String, u32>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockLeader {
    pub(crate) fn with_delay(mut self, team_id: &str, delay: Duration) -> Self {
        self.delays.insert(team_id.to_string(), delay);
        self
    }

    pub(crate) fn panicking_for(mut self, team_id: &str) -> Self {
        self.panics.insert(team_id.to_string());
        self
    }

    pub(crate) fn failing_in_round(mut self, team_id: &str, round: u32) -> Self {
        self.failures.insert(team_id.to_string(), round);
        self
    }

    pub(crate) fn tasks_for(&self, team_id: &str) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == team_id)
            .map(|(_, task)| task.clone())
            .collect()
    }
}

#[async_trait]
impl LeaderAgent for MockLeader {
    async fn run(
        &self,
        team: &TeamConfig,
        task_description: &str,
    ) -> Result<LeaderOutput, CollaboratorError> {
        let id = team.team_id.as_str().to_string();
        let round = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((id.clone(), task_description.to_string()));
            calls.iter().filter(|(team, _)| team == &id).count() as u32
        };

        if self.panics.contains(&id) {
            panic!("leader exploded for {id}");
        }
        if let Some(delay) = self.delays.get(&id) {
            tokio::time::sleep(*delay).await;
        }
        if self.failures.get(&id) == Some(&round) {
            return Err(CollaboratorError::Failed(format!("leader down in round {round}")));
        }

        Ok(LeaderOutput::new(format!("{id}:round{round}"))
            .with_usage(TokenUsage::new(10, 20))
            .with_message_history(json!([{"role": "user", "content": task_description}])))
    }
}

// ==================== Evaluator ====================

/// Scores by exact submission text, falling back to a default
pub(crate) struct MockEvaluator {
    default_score: f64,
    scores: HashMap<String, f64>,
    failures: HashSet<String>,
}

impl MockEvaluator {
    pub(crate) fn new(default_score: f64) -> Self {
        Self {
            default_score,
            scores: HashMap::new(),
            failures: HashSet::new(),
        }
    }

    pub(crate) fn score_for(mut self, submission: &str, score: f64) -> Self {
        self.scores.insert(submission.to_string(), score);
        self
    }

    pub(crate) fn failing_on(mut self, submission: &str) -> Self {
        self.failures.insert(submission.to_string());
        self
    }
}

#[async_trait]
impl Evaluator for MockEvaluator {
    async fn evaluate(
        &self,
        _user_query: &str,
        submission: &str,
    ) -> Result<EvaluationResult, CollaboratorError> {
        if self.failures.contains(submission) {
            return Err(CollaboratorError::InvalidResponse(
                "no JSON object found".to_string(),
            ));
        }
        let score = self
            .scores
            .get(submission)
            .copied()
            .unwrap_or(self.default_score);
        let overall =
            Score::new(score).map_err(|e| CollaboratorError::InvalidResponse(e.to_string()))?;
        Ok(EvaluationResult::new(overall).with_metric(MetricScore::new(
            "quality",
            score,
            "clear structure, thin examples",
        )))
    }
}

// ==================== Judge ====================

/// Pops scripted decisions; continues when the script runs out
#[derive(Default)]
pub(crate) struct MockJudge {
    decisions: Mutex<VecDeque<bool>>,
    failure: Option<CollaboratorError>,
    delay: Option<Duration>,
    contexts: Mutex<Vec<JudgmentContext>>,
}

impl MockJudge {
    pub(crate) fn with_decisions(decisions: Vec<bool>) -> Self {
        Self {
            decisions: Mutex::new(decisions.into()),
            ..Self::default()
        }
    }

    pub(crate) fn failing_with(mut self, error: CollaboratorError) -> Self {
        self.failure = Some(error);
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        self.contexts.lock().unwrap().len()
    }

    pub(crate) fn contexts(&self) -> Vec<JudgmentContext> {
        self.contexts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImprovementJudge for MockJudge {
    async fn judge(
        &self,
        context: &JudgmentContext,
    ) -> Result<ImprovementJudgment, CollaboratorError> {
        self.contexts.lock().unwrap().push(context.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        let should_continue = self.decisions.lock().unwrap().pop_front().unwrap_or(true);
        ImprovementJudgment::new(should_continue, "scripted decision", 0.8)
            .map_err(|e| CollaboratorError::InvalidResponse(e.to_string()))
    }
}

// ==================== Store ====================

type RoundKey = (String, String, u32);

/// In-memory store with the same upsert and ordering rules as SQLite
#[derive(Default)]
pub(crate) struct MemoryRoundStore {
    rounds: Mutex<BTreeMap<RoundKey, RoundRecord>>,
    leaderboard: Mutex<Vec<LeaderBoardEntry>>,
    retired: Mutex<HashSet<(String, String)>>,
    fail_reads: bool,
    fail_writes_for: Option<String>,
}

impl MemoryRoundStore {
    pub(crate) fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub(crate) fn failing_writes_for(mut self, team_id: &str) -> Self {
        self.fail_writes_for = Some(team_id.to_string());
        self
    }

    pub(crate) fn rounds_for(&self, execution_id: &ExecutionId, team_id: &str) -> Vec<u32> {
        self.rounds
            .lock()
            .unwrap()
            .keys()
            .filter(|(exec, team, _)| exec == execution_id.as_str() && team == team_id)
            .map(|(_, _, round)| *round)
            .collect()
    }

    pub(crate) fn record(
        &self,
        execution_id: &ExecutionId,
        team_id: &str,
        round: u32,
    ) -> Option<RoundRecord> {
        self.rounds
            .lock()
            .unwrap()
            .get(&(execution_id.to_string(), team_id.to_string(), round))
            .cloned()
    }

    pub(crate) fn total_rounds(&self) -> usize {
        self.rounds.lock().unwrap().len()
    }

    pub(crate) fn has_final_row(&self, execution_id: &ExecutionId, team_id: &str) -> bool {
        self.leaderboard.lock().unwrap().iter().any(|entry| {
            &entry.execution_id == execution_id
                && entry.team_id.as_str() == team_id
                && entry.final_submission
        })
    }

    pub(crate) fn leaderboard_teams(&self, execution_id: &ExecutionId) -> Vec<String> {
        let mut teams: Vec<String> = self
            .leaderboard
            .lock()
            .unwrap()
            .iter()
            .filter(|row| &row.execution_id == execution_id)
            .map(|row| row.team_id.to_string())
            .collect();
        teams.sort();
        teams.dedup();
        teams
    }

    fn check_write(&self, operation: &'static str, team_id: &TeamId) -> Result<(), StoreError> {
        if self.fail_writes_for.as_deref() == Some(team_id.as_str()) {
            return Err(StoreError::write_exhausted(
                operation,
                4,
                "database is locked",
            ));
        }
        Ok(())
    }

    fn check_read(&self, operation: &'static str) -> Result<(), StoreError> {
        if self.fail_reads {
            return Err(StoreError::read(operation, "disk I/O error"));
        }
        Ok(())
    }

    fn best_per_team(&self, execution_id: &ExecutionId) -> Vec<LeaderBoardEntry> {
        let rows = self.leaderboard.lock().unwrap();
        let mut best: HashMap<&str, &LeaderBoardEntry> = HashMap::new();
        for row in rows.iter().filter(|row| &row.execution_id == execution_id) {
            best.entry(row.team_id.as_str())
                .and_modify(|current| {
                    if leaderboard_order(row, *current).is_lt() {
                        *current = row;
                    }
                })
                .or_insert(row);
        }
        let mut entries: Vec<LeaderBoardEntry> = best.into_values().cloned().collect();
        sort_leaderboard(&mut entries);
        entries
    }
}

#[async_trait]
impl RoundStore for MemoryRoundStore {
    async fn save_round(
        &self,
        execution_id: &ExecutionId,
        team_id: &TeamId,
        round_number: u32,
        record: &RoundRecord,
    ) -> Result<(), StoreError> {
        self.check_write("save_round", team_id)?;
        self.rounds.lock().unwrap().insert(
            (execution_id.to_string(), team_id.to_string(), round_number),
            record.clone(),
        );
        Ok(())
    }

    async fn load_round(
        &self,
        execution_id: &ExecutionId,
        team_id: &TeamId,
        round_number: u32,
    ) -> Result<RoundLookup, StoreError> {
        self.check_read("load_round")?;
        Ok(
            match self.record(execution_id, team_id.as_str(), round_number) {
                Some(record) => RoundLookup::Found(record),
                None => RoundLookup::NotFound,
            },
        )
    }

    async fn load_team_rounds(
        &self,
        execution_id: &ExecutionId,
        team_id: &TeamId,
    ) -> Result<Vec<RoundRecord>, StoreError> {
        self.check_read("load_team_rounds")?;
        Ok(self
            .rounds_for(execution_id, team_id.as_str())
            .into_iter()
            .filter_map(|round| self.record(execution_id, team_id.as_str(), round))
            .collect())
    }

    async fn save_to_leaderboard(
        &self,
        entry: &LeaderboardWrite,
    ) -> Result<LeaderBoardEntry, StoreError> {
        self.check_write("save_to_leaderboard", &entry.team_id)?;
        let key = (entry.execution_id.to_string(), entry.team_id.to_string());
        if self.retired.lock().unwrap().contains(&key) {
            return Err(StoreError::InvalidRecord(format!(
                "team {} is retired",
                entry.team_id
            )));
        }
        let now = Utc::now();
        let mut rows = self.leaderboard.lock().unwrap();
        let existing = rows.iter_mut().find(|row| {
            row.execution_id == entry.execution_id
                && row.team_id == entry.team_id
                && row.round_number == entry.round_number
        });
        match existing {
            Some(row) => {
                row.team_name = entry.team_name.clone();
                row.submission_content = entry.submission_content.clone();
                row.score = entry.score;
                row.score_details = entry.score_details.clone();
                row.final_submission = entry.final_submission;
                row.exit_reason = entry.exit_reason;
                row.updated_at = now;
                Ok(row.clone())
            }
            None => {
                let row = LeaderBoardEntry {
                    execution_id: entry.execution_id.clone(),
                    team_id: entry.team_id.clone(),
                    team_name: entry.team_name.clone(),
                    round_number: entry.round_number,
                    submission_content: entry.submission_content.clone(),
                    score: entry.score,
                    score_details: entry.score_details.clone(),
                    final_submission: entry.final_submission,
                    exit_reason: entry.exit_reason,
                    created_at: now,
                    updated_at: now,
                };
                rows.push(row.clone());
                Ok(row)
            }
        }
    }

    async fn retire_team(
        &self,
        execution_id: &ExecutionId,
        team_id: &TeamId,
    ) -> Result<(), StoreError> {
        self.check_write("retire_team", team_id)?;
        self.retired
            .lock()
            .unwrap()
            .insert((execution_id.to_string(), team_id.to_string()));
        self.leaderboard
            .lock()
            .unwrap()
            .retain(|row| !(&row.execution_id == execution_id && &row.team_id == team_id));
        Ok(())
    }

    async fn get_leaderboard(
        &self,
        execution_id: &ExecutionId,
        limit: usize,
    ) -> Result<Vec<LeaderBoardEntry>, StoreError> {
        self.check_read("get_leaderboard")?;
        let mut entries = self.best_per_team(execution_id);
        entries.truncate(limit);
        Ok(entries)
    }

    async fn get_ranking(&self, execution_id: &ExecutionId) -> Result<Vec<TeamRanking>, StoreError> {
        self.check_read("get_ranking")?;
        Ok(self
            .best_per_team(execution_id)
            .into_iter()
            .map(|entry| TeamRanking {
                total_rounds: self.rounds_for(execution_id, entry.team_id.as_str()).len() as u32,
                team_id: entry.team_id,
                team_name: entry.team_name,
                max_score: entry.score,
            })
            .collect())
    }
}

// ==================== Observers ====================

/// Records progress callbacks as short strings
#[derive(Default)]
pub(crate) struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ArenaProgressNotifier for RecordingProgress {
    fn on_execution_start(&self, total_teams: usize) {
        self.push(format!("start:{total_teams}"));
    }

    fn on_team_start(&self, team_id: &TeamId, _team_name: &str) {
        self.push(format!("team_start:{team_id}"));
    }

    fn on_round_complete(&self, team_id: &TeamId, round_number: u32, _score: f64) {
        self.push(format!("round:{team_id}:{round_number}"));
    }

    fn on_team_finished(&self, team_id: &TeamId, _best_score: f64, reason: ExitReason) {
        self.push(format!("finished:{team_id}:{reason}"));
    }

    fn on_team_failed(&self, team_id: &TeamId, _error: &str) {
        self.push(format!("failed:{team_id}"));
    }

    fn on_execution_complete(&self) {
        self.push("complete".to_string());
    }
}

/// Keeps every run event in memory
#[derive(Default)]
pub(crate) struct RecordingEvents {
    events: Mutex<Vec<RunEvent>>,
}

impl RecordingEvents {
    pub(crate) fn events(&self) -> Vec<RunEvent> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(RunEvent::kind).collect()
    }
}

impl RunEventLogger for RecordingEvents {
    fn log(&self, event: RunEvent) {
        self.events.lock().unwrap().push(event);
    }
}
