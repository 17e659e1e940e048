//! Storage and log locations from TOML (`[database]` and `[logging]` sections)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::store::RetryPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDatabaseConfig {
    /// Database file; defaults to the user data directory
    pub path: Option<PathBuf>,
    /// Retries after the first attempt when the database is locked
    pub max_retries: u32,
    /// Delay before the first retry, doubled for each further retry
    pub retry_base_delay_ms: u64,
}

impl Default for FileDatabaseConfig {
    fn default() -> Self {
        let retry = RetryPolicy::default();
        Self {
            path: None,
            max_retries: retry.max_retries,
            retry_base_delay_ms: retry.base_delay.as_millis() as u64,
        }
    }
}

impl FileDatabaseConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_database_path)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries,
            Duration::from_millis(self.retry_base_delay_ms),
        )
    }
}

/// `$XDG_DATA_HOME/team-arena/arena.db`, or `./arena.db` without a data dir
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("team-arena").join("arena.db"))
        .unwrap_or_else(|| PathBuf::from("arena.db"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for `<execution_id>.events.jsonl` run-event logs
    pub event_log_dir: Option<PathBuf>,
    /// Directory for tracing output files; stderr only when unset
    pub log_dir: Option<PathBuf>,
}
