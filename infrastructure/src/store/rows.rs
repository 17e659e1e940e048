//! Conversions between SQLite rows and domain records.

use arena_application::RoundRecord;
use arena_domain::{ExecutionId, ExitReason, LeaderBoardEntry, RoundState, Score, TeamId, TeamRanking};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;
use rusqlite::types::Type;

/// Fixed-width UTC timestamps so text order matches time order
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn conversion_error<E>(index: usize, error: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
}

fn parse_timestamp(index: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| conversion_error(index, e))
}

fn parse_json(index: usize, value: &str) -> rusqlite::Result<serde_json::Value> {
    serde_json::from_str(value).map_err(|e| conversion_error(index, e))
}

fn team_id(index: usize, value: String) -> rusqlite::Result<TeamId> {
    TeamId::new(value).map_err(|e| conversion_error(index, e))
}

fn score(index: usize, value: f64) -> rusqlite::Result<Score> {
    Score::new(value).map_err(|e| conversion_error(index, e))
}

fn exit_reason(index: usize, value: Option<String>) -> rusqlite::Result<Option<ExitReason>> {
    value
        .map(|reason| {
            serde_json::from_value(serde_json::Value::String(reason))
                .map_err(|e| conversion_error(index, e))
        })
        .transpose()
}

/// Columns selected for a leaderboard entry, in [`entry_from_row`] order
pub(crate) const ENTRY_COLUMNS: &str = "execution_id, team_id, team_name, round_number, \
     submission_content, score, score_details, final_submission, exit_reason, created_at, updated_at";

pub(crate) fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<LeaderBoardEntry> {
    Ok(LeaderBoardEntry {
        execution_id: ExecutionId::new(row.get::<_, String>(0)?),
        team_id: team_id(1, row.get(1)?)?,
        team_name: row.get(2)?,
        round_number: row.get(3)?,
        submission_content: row.get(4)?,
        score: score(5, row.get(5)?)?,
        score_details: parse_json(6, &row.get::<_, String>(6)?)?,
        final_submission: row.get(7)?,
        exit_reason: exit_reason(8, row.get(8)?)?,
        created_at: parse_timestamp(9, &row.get::<_, String>(9)?)?,
        updated_at: parse_timestamp(10, &row.get::<_, String>(10)?)?,
    })
}

/// Expects `team_id, team_name, score, total_rounds`
pub(crate) fn ranking_from_row(row: &Row<'_>) -> rusqlite::Result<TeamRanking> {
    Ok(TeamRanking {
        team_id: team_id(0, row.get(0)?)?,
        team_name: row.get(1)?,
        max_score: score(2, row.get(2)?)?,
        total_rounds: row.get(3)?,
    })
}

/// Expects `team_name, round_record, message_history`
pub(crate) fn record_from_row(row: &Row<'_>) -> rusqlite::Result<RoundRecord> {
    let team_name: String = row.get(0)?;
    let record: String = row.get(1)?;
    let history: String = row.get(2)?;

    let state: RoundState = serde_json::from_str(&record).map_err(|e| conversion_error(1, e))?;
    let state = state.with_message_history(parse_json(2, &history)?);
    Ok(RoundRecord::new(team_name, state))
}
