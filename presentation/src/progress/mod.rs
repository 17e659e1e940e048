//! Progress reporting during an execution

pub mod reporter;
