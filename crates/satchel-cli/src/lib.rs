//! Satchel CLI - search, table printing and an interactive query shell over
//! JSON datasets
//!
//! This crate wires the `satchel-core` helpers to a command line: one-shot
//! `search` and `table` reports plus a rustyline-driven shell.

pub mod dataset;
pub mod report;
pub mod shell;

// Re-export commonly used types for convenience
pub use dataset::load_dataset;
pub use report::{search_report, table_report, TableRequest};
pub use shell::{DefaultNotifier, Shell, ShellCommand, ShellNotifier};
