use std::path::PathBuf;

use anyhow::{Context, Result};
use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;

use super::{CommandResult, CommandSummary, ExtractSummary, FileReport, FileStatus};
use crate::cli::args::ExtractCommand;
use crate::config::{Config, load_config};
use crate::pipeline::{FileOutcome, Overrides, run_file};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let loaded = load_config(&cwd)?;

    let files = collect_files(&cmd.paths, &loaded.config)?;
    let overrides = Overrides {
        languages: &cmd.common.languages,
        source_lang: cmd.common.source_lang.as_deref(),
    };

    // Each file is an independent run with its own registry.
    let mut reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| {
            let status = match run_file(path, &overrides, &loaded.config, cmd.dry_run) {
                Ok(FileOutcome::Skipped) => FileStatus::Skipped,
                Ok(FileOutcome::Extracted(report)) => FileStatus::Extracted {
                    keys: report.keys_used,
                    written: report.written,
                    failed_langs: report.failed_langs,
                },
                Err(err) => {
                    eprintln!("ERROR: {:#}", err);
                    FileStatus::ReadError(format!("{:#}", err))
                }
            };
            FileReport {
                path: path.clone(),
                status,
            }
        })
        .collect();
    reports.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(CommandResult {
        summary: CommandSummary::Extract(ExtractSummary {
            files: reports,
            dry_run: cmd.dry_run,
        }),
    })
}

/// Expands the CLI paths into the list of documents to process.
///
/// Explicit file paths are taken as-is, missing ones included so the
/// pipeline can report the read failure; directories are walked and
/// filtered through the config's include/ignore globs.
fn collect_files(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let includes = compile_patterns(&config.includes)?;
    let ignores = compile_patterns(&config.ignores)?;

    let roots: Vec<PathBuf> = if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths.to_vec()
    };

    let mut files = Vec::new();
    for root in roots {
        if !root.is_dir() {
            files.push(root);
            continue;
        }
        for entry in WalkDir::new(&root).into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let relative = path.strip_prefix(&root).unwrap_or(path);
            let relative = relative.to_string_lossy();
            if ignores.iter().any(|p| p.matches(&relative)) {
                continue;
            }
            if !includes.is_empty() && !includes.iter().any(|p| p.matches(&relative)) {
                continue;
            }
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid glob pattern: \"{}\"", p)))
        .collect()
}
