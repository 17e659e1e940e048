//! Infrastructure layer for team-arena
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the SQLite round store, the OpenAI-compatible
//! LLM gateway, the JSONL run-event logger, and configuration file loading.

pub mod config;
pub mod logging;
pub mod openai;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigSource, FileConfig};
pub use logging::JsonlRunEventLogger;
pub use openai::{OpenAiGateway, OpenAiSession, OpenAiSettings};
pub use store::{RetryPolicy, SqliteRoundStore, StoreOptions};
