//! High-level operations that correspond to CLI commands
//!
//! These contain the end-to-end pipeline, separated from CLI concerns like
//! argument parsing, prompting and printing the final result.

pub mod run;

pub use run::run_operation;
