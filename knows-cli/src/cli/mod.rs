//! Command-line interface for the knows graph generator.
//!
//! A single command generates a graph from counts, property selections or a
//! schema file and renders it in the chosen format to stdout or a file.

mod commands;
mod output;

pub use commands::{Cli, CliError, ExecutionSummary, run_cli};
pub use output::write_output;
