//! One extraction run over one document.
//!
//! An `ExtractionRun` owns the key registry and options for a single
//! document; nothing is shared across runs, so batch processing can run
//! documents in parallel without cross-contamination. The run performs
//! two coordinated passes over the same registry: a metadata pre-pass
//! that registers title/description-like values, then the line scan.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{Config, DocumentOptions};
use crate::emit::{LocalizedEmitter, STRINGS_FIELD, output_path};
use crate::registry::KeyRegistry;
use crate::scan::front_matter::is_translatable_field;
use crate::scan::DocumentScanner;
use crate::utils::{front_matter_end, strip_quotes};

/// Resolved options for one run, immutable once the scan starts.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Ordered, deduplicated, never empty.
    pub languages: Vec<String>,
    pub source_lang: String,
}

/// CLI-level overrides applied on top of document and project settings.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides<'a> {
    pub languages: &'a [String],
    pub source_lang: Option<&'a str>,
}

impl RunOptions {
    /// Precedence: CLI flags, then the document's `localize:` section,
    /// then the project config.
    pub fn resolve(overrides: &Overrides, doc: &DocumentOptions, config: &Config) -> Self {
        let source_lang = overrides
            .source_lang
            .map(str::to_string)
            .or_else(|| doc.source_lang.clone())
            .unwrap_or_else(|| config.source_lang.clone());

        let mut languages = if !overrides.languages.is_empty() {
            overrides.languages.to_vec()
        } else if let Some(langs) = doc.languages.as_ref().filter(|l| !l.is_empty()) {
            langs.clone()
        } else {
            config.languages.clone()
        };
        if languages.is_empty() {
            languages.push(source_lang.clone());
        }

        let mut seen = std::collections::HashSet::new();
        languages.retain(|l| seen.insert(l.clone()));

        RunOptions {
            languages,
            source_lang,
        }
    }
}

/// True if the document already carries a generated block, meaning it is
/// a finalized per-language file rather than a source awaiting
/// extraction.
pub fn is_localized(lines: &[String]) -> bool {
    let Some(end) = front_matter_end(lines) else {
        return false;
    };
    lines[1..end]
        .iter()
        .any(|l| l.trim_end() == format!("{}:", STRINGS_FIELD))
}

pub struct ExtractionRun {
    registry: KeyRegistry,
    options: RunOptions,
}

impl ExtractionRun {
    pub fn new(options: RunOptions) -> Self {
        Self {
            registry: KeyRegistry::new(),
            options,
        }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    /// Registers already-extracted metadata texts under the `meta`
    /// context before the line scan. The same dedup rule applies, so the
    /// scan later resolves identical text to these keys.
    pub fn preregister_meta<I, S>(&mut self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for text in texts {
            self.registry.register(text.as_ref(), "meta");
        }
    }

    /// Runs the line scan, producing the rewritten document.
    pub fn scan(&mut self, input: &[String]) -> Vec<String> {
        DocumentScanner::new(&mut self.registry).scan(input)
    }

    /// Renders one language's document from the rewritten lines.
    pub fn render(&self, rewritten: &[String], lang: &str) -> String {
        LocalizedEmitter::new(&self.registry, &self.options.source_lang).render(rewritten, lang)
    }
}

/// What happened to one input file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Already carries a generated block; returned unchanged.
    Skipped,
    Extracted(ExtractReport),
}

#[derive(Debug)]
pub struct ExtractReport {
    pub keys_used: usize,
    pub written: Vec<PathBuf>,
    /// Languages whose output file could not be written.
    pub failed_langs: Vec<String>,
}

/// Scalar values of translatable front matter fields, mirroring the
/// host-side structural pass that feeds `preregister_meta`.
fn front_matter_meta(lines: &[String]) -> Vec<String> {
    let Some(end) = front_matter_end(lines) else {
        return Vec::new();
    };
    lines[1..end]
        .iter()
        .filter_map(|line| {
            let (field, value) = line.split_once(':')?;
            if !is_translatable_field(field) {
                return None;
            }
            let value = strip_quotes(value.trim());
            (!value.is_empty()).then(|| value.to_string())
        })
        .collect()
}

/// Runs the full pipeline for one file: read, re-entrancy check, option
/// resolution, meta pre-pass, scan, then one emission per language.
///
/// A language whose file cannot be written is reported and skipped; the
/// remaining languages are still attempted.
pub fn run_file(
    path: &Path,
    overrides: &Overrides,
    config: &Config,
    dry_run: bool,
) -> Result<FileOutcome> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let lines: Vec<String> = content.lines().map(str::to_string).collect();

    if is_localized(&lines) {
        return Ok(FileOutcome::Skipped);
    }

    let doc_options = DocumentOptions::from_front_matter(&lines);
    let options = RunOptions::resolve(overrides, &doc_options, config);

    let mut run = ExtractionRun::new(options);
    run.preregister_meta(front_matter_meta(&lines));
    let rewritten = run.scan(&lines);

    let mut written = Vec::new();
    let mut failed_langs = Vec::new();
    for lang in run.options().languages.clone() {
        let out_path = output_path(path, &lang);
        if dry_run {
            written.push(out_path);
            continue;
        }
        let document = run.render(&rewritten, &lang);
        match fs::write(&out_path, document) {
            Ok(()) => written.push(out_path),
            Err(err) => {
                eprintln!("ERROR: failed to write {}: {}", out_path.display(), err);
                failed_langs.push(lang.clone());
            }
        }
    }

    Ok(FileOutcome::Extracted(ExtractReport {
        keys_used: run.registry().used_count(),
        written,
        failed_langs,
    }))
}
