//! High-level operations that correspond to CLI commands
//!
//! These modules contain the glue between file selection, planning,
//! execution and reporting, separated from CLI concerns like argument
//! parsing, prompting and output formatting.

pub mod plan;
pub mod rename;

pub use plan::{plan_operation, PlanRequest};
pub use rename::{rename_operation, RenameRequest};
