//! Core domain concepts shared across all subdomains.
//!
//! - [`ids::ExecutionId`] / [`ids::TeamId`]: identifiers scoping every record
//! - [`error::DomainError`]: domain-level validation errors

pub mod error;
pub mod ids;
pub mod string;
