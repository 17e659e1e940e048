//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod collaborator;
pub mod llm_gateway;
pub mod progress;
pub mod round_store;
pub mod run_event_logger;
