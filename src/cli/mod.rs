//! Command-line interface layer: argument parsing, command dispatch and
//! exit codes.

mod args;
pub mod commands;
mod exit_status;
mod run;

pub use args::{Arguments, Command, CommonArgs, ExtractCommand};
pub use exit_status::ExitStatus;
pub use run::run_cli;
