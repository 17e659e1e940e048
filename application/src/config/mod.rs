//! Application-level configuration.
//!
//! - [`ExecutionParams`]: round bounds, timeouts and orchestrator limits

pub mod execution_params;

pub use execution_params::ExecutionParams;
