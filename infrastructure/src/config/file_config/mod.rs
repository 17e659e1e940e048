//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain and application
//! types at startup.

mod models;
mod providers;
mod rounds;
mod storage;
mod teams;

pub use models::FileModelsConfig;
pub use providers::{FileOpenAiConfig, FileProvidersConfig};
pub use rounds::{FileRoundsConfig, FileTimeoutsConfig};
pub use storage::{FileDatabaseConfig, FileLoggingConfig, default_database_path};
pub use teams::FileTeamConfig;

use arena_application::ExecutionParams;
use arena_domain::{ConfigIssue, DomainError, TeamConfig};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Round bounds
    pub rounds: FileRoundsConfig,
    /// Per-call, per-team and overall time limits
    pub timeouts: FileTimeoutsConfig,
    /// Round store location and write retry policy
    pub database: FileDatabaseConfig,
    /// Role-based model selection
    pub models: FileModelsConfig,
    /// Provider settings (endpoint and credentials)
    pub providers: FileProvidersConfig,
    /// Log file locations
    pub logging: FileLoggingConfig,
    /// Teams used when none are given on the command line
    pub teams: Vec<FileTeamConfig>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors make the configuration unusable; warnings are informational.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.rounds.issues());
        issues.extend(self.timeouts.issues());
        issues.extend(self.models.issues());
        issues.extend(teams::team_issues(&self.teams));
        issues
    }

    /// Execution parameters for the orchestrator
    pub fn execution_params(&self) -> Result<ExecutionParams, DomainError> {
        Ok(ExecutionParams::default()
            .with_bounds(self.rounds.to_bounds()?)
            .with_timeouts(self.timeouts.to_timeouts())
            .with_overall_timeout(self.timeouts.overall()))
    }

    /// The `[[teams]]` entries as domain team configurations
    pub fn team_configs(&self) -> Result<Vec<TeamConfig>, DomainError> {
        self.teams.iter().map(FileTeamConfig::to_team_config).collect()
    }
}
