//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all qlot
//! commands. It uses clap's derive API for declarative argument parsing.
//!
//! ## Commands
//!
//! - `extract`: Extract translatable strings and write per-language copies
//! - `init`: Initialize qlot configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Consume the arguments, printing help and returning `None` when no
    /// command was provided.
    pub fn into_command_or_help(self) -> Option<Command> {
        if self.command.is_none() {
            Self::command().print_help().ok();
        }
        self.command
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by document-processing commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Target languages, comma separated (overrides config file and
    /// document settings)
    #[arg(long, value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Source language (overrides config file and document settings)
    #[arg(long)]
    pub source_lang: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Files or directories to process (default: current directory)
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Report what would be written without writing any files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable strings into per-language document copies
    Extract(ExtractCommand),
    /// Initialize a new .qlotrc.json configuration file
    Init,
}
