//! Output formatting for execution results

pub mod console;
pub mod formatter;
