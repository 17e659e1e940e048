//! SQLite implementation of the [`RoundStore`] port.
//!
//! One writer connection and one reader connection to the same WAL-mode
//! database. Writes run on the blocking pool, one `IMMEDIATE` transaction
//! per call, and go through [`with_write_retry`]; reads use the reader
//! connection and see the last committed snapshot without waiting on
//! writers.

use super::retry::{AttemptError, RetryPolicy, with_write_retry};
use super::rows::{ENTRY_COLUMNS, entry_from_row, format_timestamp, ranking_from_row, record_from_row};
use super::schema::{SUBMISSION_FORMAT, init_schema};
use arena_application::{
    LeaderboardWrite, RoundLookup, RoundRecord, RoundStore, StoreError,
};
use arena_domain::{ExecutionId, LeaderBoardEntry, TeamId, TeamRanking};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior, params};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

/// How long the reader waits on a checkpoint or recovery lock
const READER_BUSY_TIMEOUT: Duration = Duration::from_secs(2);

/// Options for [`SqliteRoundStore::open`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreOptions {
    pub retry: RetryPolicy,
}

impl StoreOptions {
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Shared handle to the round store database
///
/// Cheap to clone; every clone talks to the same two connections.
#[derive(Clone)]
pub struct SqliteRoundStore {
    writer: Arc<Mutex<Connection>>,
    reader: Arc<Mutex<Connection>>,
    retry: RetryPolicy,
    path: PathBuf,
}

impl SqliteRoundStore {
    /// Open (creating if needed) the database at `path`
    pub fn open(path: impl AsRef<Path>, options: StoreOptions) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::read("open", format!("{}: {}", parent.display(), e)))?;
        }

        let writer = Connection::open(&path).map_err(|e| StoreError::read("open", e.to_string()))?;
        configure_writer(&writer).map_err(|e| StoreError::read("open", e.to_string()))?;
        init_schema(&writer).map_err(|e| StoreError::read("open", e.to_string()))?;

        let reader = Connection::open(&path).map_err(|e| StoreError::read("open", e.to_string()))?;
        reader
            .busy_timeout(READER_BUSY_TIMEOUT)
            .map_err(|e| StoreError::read("open", e.to_string()))?;

        info!(path = %path.display(), "Opened round store");
        Ok(Self {
            writer: Arc::new(Mutex::new(writer)),
            reader: Arc::new(Mutex::new(reader)),
            retry: options.retry,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checkpoint the WAL into the main database file
    pub async fn close(&self) -> Result<(), StoreError> {
        let writer = Arc::clone(&self.writer);
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = writer
                .lock()
                .map_err(|_| StoreError::read("close", "writer connection poisoned"))?;
            conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))
                .map_err(|e| StoreError::read("close", e.to_string()))?;
            info!(path = %path.display(), "Closed round store");
            Ok(())
        })
        .await
        .map_err(|e| StoreError::read("close", e.to_string()))?
    }

    /// Run `statement` in its own IMMEDIATE transaction, retrying contention
    async fn write<T, F>(&self, operation: &'static str, statement: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: Fn(&Transaction<'_>) -> rusqlite::Result<T> + Send + Sync + 'static,
    {
        let statement = Arc::new(statement);
        with_write_retry(self.retry, operation, || {
            let writer = Arc::clone(&self.writer);
            let statement = Arc::clone(&statement);
            async move {
                tokio::task::spawn_blocking(move || -> Result<T, AttemptError> {
                    let mut conn = writer.lock().map_err(|_| {
                        AttemptError::Fatal("writer connection poisoned".to_string())
                    })?;
                    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
                    let value = statement(&tx)?;
                    tx.commit()?;
                    Ok(value)
                })
                .await
                .map_err(|e| AttemptError::Fatal(format!("write task failed: {e}")))?
            }
        })
        .await
    }

    async fn read<T, F>(&self, operation: &'static str, query: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let reader = Arc::clone(&self.reader);
        tokio::task::spawn_blocking(move || {
            let conn = reader
                .lock()
                .map_err(|_| StoreError::read(operation, "reader connection poisoned"))?;
            query(&conn).map_err(|e| StoreError::read(operation, e.to_string()))
        })
        .await
        .map_err(|e| StoreError::read(operation, e.to_string()))?
    }
}

fn configure_writer(conn: &Connection) -> rusqlite::Result<()> {
    let mode: String = conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    debug!(journal_mode = %mode, "Configured journal mode");
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    // Contention surfaces immediately as SQLITE_BUSY and is handled by the retry policy
    conn.busy_timeout(Duration::ZERO)
}

/// Best row per team for one execution, ranked
const BEST_PER_TEAM: &str = "SELECT *, ROW_NUMBER() OVER (
        PARTITION BY team_id ORDER BY score DESC, created_at ASC, id ASC
    ) AS team_rank
    FROM leader_board
    WHERE execution_id = ?1";

#[async_trait]
impl RoundStore for SqliteRoundStore {
    async fn save_round(
        &self,
        execution_id: &ExecutionId,
        team_id: &TeamId,
        round_number: u32,
        record: &RoundRecord,
    ) -> Result<(), StoreError> {
        if round_number == 0 || record.state.round_number() != round_number {
            return Err(StoreError::InvalidRecord(format!(
                "round number {} does not match record round {}",
                round_number,
                record.state.round_number()
            )));
        }

        let round_record = serde_json::to_string(&record.state.without_message_history())
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let message_history = serde_json::to_string(record.state.message_history())
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let execution_id = execution_id.to_string();
        let team_id = team_id.to_string();
        let team_name = record.team_name.clone();
        let score = record.state.score().value();

        self.write("save_round", move |tx| {
            let now = format_timestamp(Utc::now());
            tx.execute(
                "INSERT INTO round_history
                    (execution_id, team_id, team_name, round_number, score,
                     round_record, message_history, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
                 ON CONFLICT (execution_id, team_id, round_number) DO UPDATE SET
                    team_name = excluded.team_name,
                    score = excluded.score,
                    round_record = excluded.round_record,
                    message_history = excluded.message_history,
                    updated_at = excluded.updated_at",
                params![
                    execution_id,
                    team_id,
                    team_name,
                    round_number,
                    score,
                    round_record,
                    message_history,
                    now
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn load_round(
        &self,
        execution_id: &ExecutionId,
        team_id: &TeamId,
        round_number: u32,
    ) -> Result<RoundLookup, StoreError> {
        let execution_id = execution_id.to_string();
        let team_id = team_id.to_string();
        let record = self
            .read("load_round", move |conn| {
                conn.query_row(
                    "SELECT team_name, round_record, message_history FROM round_history
                     WHERE execution_id = ?1 AND team_id = ?2 AND round_number = ?3",
                    params![execution_id, team_id, round_number],
                    record_from_row,
                )
                .optional()
            })
            .await?;

        Ok(match record {
            Some(record) => RoundLookup::Found(record),
            None => RoundLookup::NotFound,
        })
    }

    async fn load_team_rounds(
        &self,
        execution_id: &ExecutionId,
        team_id: &TeamId,
    ) -> Result<Vec<RoundRecord>, StoreError> {
        let execution_id = execution_id.to_string();
        let team_id = team_id.to_string();
        self.read("load_team_rounds", move |conn| {
            let mut stmt = conn.prepare(
                "SELECT team_name, round_record, message_history FROM round_history
                 WHERE execution_id = ?1 AND team_id = ?2
                 ORDER BY round_number ASC",
            )?;
            let rows = stmt.query_map(params![execution_id, team_id], record_from_row)?;
            rows.collect()
        })
        .await
    }

    async fn save_to_leaderboard(
        &self,
        entry: &LeaderboardWrite,
    ) -> Result<LeaderBoardEntry, StoreError> {
        if entry.round_number == 0 {
            return Err(StoreError::InvalidRecord(
                "leaderboard round number must be at least 1".to_string(),
            ));
        }

        let score_details = serde_json::to_string(&entry.score_details)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let entry = entry.clone();
        let (execution_id, team_id) = (entry.execution_id.clone(), entry.team_id.clone());

        let stored = self.write("save_to_leaderboard", move |tx| {
            let now = format_timestamp(Utc::now());
            // Retired teams select no row, so neither insert nor update happens
            let sql = format!(
                "INSERT INTO leader_board
                    (execution_id, team_id, team_name, round_number, submission_content,
                     submission_format, score, score_details, final_submission, exit_reason,
                     created_at, updated_at)
                 SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11
                 WHERE NOT EXISTS (
                    SELECT 1 FROM retired_teams WHERE execution_id = ?1 AND team_id = ?2
                 )
                 ON CONFLICT (execution_id, team_id, round_number) DO UPDATE SET
                    team_name = excluded.team_name,
                    submission_content = excluded.submission_content,
                    submission_format = excluded.submission_format,
                    score = excluded.score,
                    score_details = excluded.score_details,
                    final_submission = excluded.final_submission,
                    exit_reason = excluded.exit_reason,
                    updated_at = excluded.updated_at
                 RETURNING {ENTRY_COLUMNS}"
            );
            tx.query_row(
                &sql,
                params![
                    entry.execution_id.as_str(),
                    entry.team_id.as_str(),
                    entry.team_name,
                    entry.round_number,
                    entry.submission_content,
                    SUBMISSION_FORMAT,
                    entry.score.value(),
                    score_details,
                    entry.final_submission,
                    entry.exit_reason.map(|reason| reason.as_str()),
                    now
                ],
                entry_from_row,
            )
            .optional()
        })
        .await?;

        stored.ok_or_else(|| {
            StoreError::InvalidRecord(format!(
                "team {} is retired from execution {}",
                team_id, execution_id
            ))
        })
    }

    async fn retire_team(
        &self,
        execution_id: &ExecutionId,
        team_id: &TeamId,
    ) -> Result<(), StoreError> {
        let execution_id = execution_id.to_string();
        let team_id = team_id.to_string();
        let log_team = team_id.clone();

        let removed = self
            .write("retire_team", move |tx| {
                tx.execute(
                    "INSERT INTO retired_teams (execution_id, team_id, retired_at)
                     VALUES (?1, ?2, ?3)
                     ON CONFLICT (execution_id, team_id) DO NOTHING",
                    params![execution_id, team_id, format_timestamp(Utc::now())],
                )?;
                tx.execute(
                    "DELETE FROM leader_board WHERE execution_id = ?1 AND team_id = ?2",
                    params![execution_id, team_id],
                )
            })
            .await?;

        debug!(team_id = %log_team, removed, "Retired team from leaderboard");
        Ok(())
    }

    async fn get_leaderboard(
        &self,
        execution_id: &ExecutionId,
        limit: usize,
    ) -> Result<Vec<LeaderBoardEntry>, StoreError> {
        let execution_id = execution_id.to_string();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.read("get_leaderboard", move |conn| {
            let sql = format!(
                "SELECT {ENTRY_COLUMNS} FROM ({BEST_PER_TEAM})
                 WHERE team_rank = 1
                 ORDER BY score DESC, created_at ASC, id ASC
                 LIMIT ?2"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![execution_id, limit], entry_from_row)?;
            rows.collect()
        })
        .await
    }

    async fn get_ranking(&self, execution_id: &ExecutionId) -> Result<Vec<TeamRanking>, StoreError> {
        let execution_id = execution_id.to_string();
        self.read("get_ranking", move |conn| {
            let sql = format!(
                "SELECT best.team_id, best.team_name, best.score,
                    (SELECT COUNT(*) FROM round_history rh
                     WHERE rh.execution_id = best.execution_id AND rh.team_id = best.team_id)
                 FROM ({BEST_PER_TEAM}) AS best
                 WHERE best.team_rank = 1
                 ORDER BY best.score DESC, best.created_at ASC, best.id ASC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![execution_id], ranking_from_row)?;
            rows.collect()
        })
        .await
    }
}
