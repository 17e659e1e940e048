//! Configuration domain types shared by the loaders.

pub mod validation;

pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
