//! Report formatting and printing utilities.
//!
//! This module is separate from the core pipeline logic to allow qlot
//! to be used as a library without printing side effects. Hard I/O
//! errors already went to stderr with an `ERROR:` prefix at the point
//! of failure; this is the per-file overview printed afterwards.

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::cli::commands::{CommandResult, CommandSummary, ExtractSummary, FileStatus};
use crate::config::CONFIG_FILE_NAME;

/// Success mark for consistent output formatting
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓
/// Failure mark for consistent output formatting
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Extract(summary) => print_extract(summary, verbose),
        CommandSummary::Init(summary) => {
            if summary.created {
                println!("{} Created {}", SUCCESS_MARK.green(), CONFIG_FILE_NAME);
            }
        }
    }
}

fn print_extract(summary: &ExtractSummary, verbose: bool) {
    // Align the detail column on the widest path.
    let width = summary
        .files
        .iter()
        .map(|f| UnicodeWidthStr::width(f.path.display().to_string().as_str()))
        .max()
        .unwrap_or(0);

    for file in &summary.files {
        let path = file.path.display().to_string();
        let pad = " ".repeat(width - UnicodeWidthStr::width(path.as_str()));

        match &file.status {
            FileStatus::Extracted {
                keys,
                written,
                failed_langs,
            } => {
                let mark = if failed_langs.is_empty() {
                    SUCCESS_MARK.green()
                } else {
                    FAILURE_MARK.red()
                };
                let verb = if summary.dry_run { "would write" } else { "wrote" };
                let outputs: Vec<String> = written
                    .iter()
                    .filter_map(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .collect();
                let mut line = format!(
                    "{} {}{}  {} keys, {} {}",
                    mark,
                    path,
                    pad,
                    keys,
                    verb,
                    outputs.join(", ")
                );
                if !failed_langs.is_empty() {
                    line.push_str(&format!(
                        "  ({} failed: {})",
                        "write".red(),
                        failed_langs.join(", ")
                    ));
                }
                println!("{}", line);
            }
            FileStatus::Skipped => {
                if verbose {
                    println!(
                        "{} {}{}  {}",
                        "-".dimmed(),
                        path.dimmed(),
                        pad,
                        "already localized, skipped".dimmed()
                    );
                }
            }
            FileStatus::ReadError(message) => {
                println!("{} {}{}  {}", FAILURE_MARK.red(), path, pad, message.red());
            }
        }
    }

    let counts = format!(
        "{} extracted, {} skipped, {} failed, {} keys",
        summary.extracted(),
        summary.skipped(),
        summary.failed(),
        summary.keys()
    );
    if summary.failed() > 0 {
        println!("{} {}", FAILURE_MARK.red(), counts);
    } else {
        println!("{} {}", SUCCESS_MARK.green(), counts);
    }
}
