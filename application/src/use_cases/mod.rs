//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod judge_improvement;
pub mod run_arena;
pub mod run_team;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod test_support;
