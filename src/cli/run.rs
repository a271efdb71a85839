//! Main entry point for the qlot CLI.
//!
//! Dispatches to the appropriate command handler based on the parsed
//! arguments and prints the operator-facing report.

use std::{fs, path::Path};

use anyhow::Result;

use super::args::{Arguments, Command};
use super::commands::extract::extract;
use super::commands::{CommandResult, CommandSummary, InitSummary};
use super::exit_status::ExitStatus;
use crate::config::{CONFIG_FILE_NAME, default_config_json};
use crate::report;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();
    let Some(command) = args.into_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = match command {
        Command::Extract(cmd) => extract(cmd)?,
        Command::Init => {
            init()?;
            CommandResult {
                summary: CommandSummary::Init(InitSummary { created: true }),
            }
        }
    };

    report::print(&result, verbose);
    Ok(result.exit_status())
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(())
}
