//! Table definitions for the round store.

use rusqlite::Connection;
use tracing::info;

/// Default `submission_format` written to the leaderboard
pub const SUBMISSION_FORMAT: &str = "text";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS round_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    execution_id TEXT NOT NULL,
    team_id TEXT NOT NULL,
    team_name TEXT NOT NULL,
    round_number INTEGER NOT NULL CHECK (round_number >= 1),
    score REAL NOT NULL CHECK (score >= 0 AND score <= 100),
    round_record TEXT NOT NULL,
    message_history TEXT NOT NULL DEFAULT 'null',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (execution_id, team_id, round_number)
);

CREATE TABLE IF NOT EXISTS leader_board (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    execution_id TEXT NOT NULL,
    team_id TEXT NOT NULL,
    team_name TEXT NOT NULL,
    round_number INTEGER NOT NULL CHECK (round_number >= 1),
    submission_content TEXT NOT NULL,
    submission_format TEXT NOT NULL DEFAULT 'text',
    score REAL NOT NULL CHECK (score >= 0 AND score <= 100),
    score_details TEXT NOT NULL DEFAULT '{}',
    final_submission INTEGER NOT NULL DEFAULT 0 CHECK (final_submission IN (0, 1)),
    exit_reason TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (execution_id, team_id, round_number)
);

CREATE INDEX IF NOT EXISTS idx_leader_board_ranking
    ON leader_board (execution_id, score DESC, created_at ASC);

-- Failed teams; their leaderboard rows are gone and stay gone
CREATE TABLE IF NOT EXISTS retired_teams (
    execution_id TEXT NOT NULL,
    team_id TEXT NOT NULL,
    retired_at TEXT NOT NULL,
    PRIMARY KEY (execution_id, team_id)
);
"#;

pub(crate) fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    info!("Initializing round store schema");
    conn.execute_batch(SCHEMA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('round_history', 'leader_board', 'retired_teams')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 3);
    }

    #[test]
    fn test_check_constraints_reject_bad_rows() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let zero_round = conn.execute(
            "INSERT INTO round_history (execution_id, team_id, team_name, round_number, score, round_record, created_at, updated_at)
             VALUES ('e', 't', 't', 0, 10, '{}', 'now', 'now')",
            [],
        );
        assert!(zero_round.is_err());

        let bad_score = conn.execute(
            "INSERT INTO leader_board (execution_id, team_id, team_name, round_number, submission_content, score, created_at, updated_at)
             VALUES ('e', 't', 't', 1, 'x', 101, 'now', 'now')",
            [],
        );
        assert!(bad_score.is_err());
    }
}
