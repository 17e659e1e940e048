//! Configuration file loading for team-arena
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./arena.toml` or `./.arena.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/team-arena/config.toml`
//! 4. Environment: `ARENA_<SECTION>__<KEY>` variables
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileDatabaseConfig, FileLoggingConfig, FileModelsConfig, FileOpenAiConfig,
    FileProvidersConfig, FileRoundsConfig, FileTeamConfig, FileTimeoutsConfig,
    default_database_path,
};
pub use loader::{ConfigLoader, ConfigSource};
