pub mod extract;

use std::path::PathBuf;

use crate::cli::exit_status::ExitStatus;

/// Result of running one qlot command.
pub struct CommandResult {
    pub summary: CommandSummary,
}

pub enum CommandSummary {
    Extract(ExtractSummary),
    Init(InitSummary),
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        match &self.summary {
            CommandSummary::Extract(summary) if summary.failed() > 0 => ExitStatus::Failure,
            _ => ExitStatus::Success,
        }
    }
}

/// Per-file outcome carried into the report.
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
}

pub enum FileStatus {
    Extracted {
        keys: usize,
        written: Vec<PathBuf>,
        failed_langs: Vec<String>,
    },
    /// Already carries a generated block.
    Skipped,
    /// The input could not be read.
    ReadError(String),
}

pub struct ExtractSummary {
    pub files: Vec<FileReport>,
    pub dry_run: bool,
}

impl ExtractSummary {
    pub fn extracted(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Extracted { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Skipped))
            .count()
    }

    /// Files that could not be read, plus files with at least one
    /// unwritable language output.
    pub fn failed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| match &f.status {
                FileStatus::ReadError(_) => true,
                FileStatus::Extracted { failed_langs, .. } => !failed_langs.is_empty(),
                FileStatus::Skipped => false,
            })
            .count()
    }

    pub fn keys(&self) -> usize {
        self.files
            .iter()
            .map(|f| match &f.status {
                FileStatus::Extracted { keys, .. } => *keys,
                _ => 0,
            })
            .sum()
    }
}

pub struct InitSummary {
    pub created: bool,
}
