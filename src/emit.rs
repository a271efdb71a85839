//! Per-language document assembly.
//!
//! Each configured language gets one copy of the rewritten document: the
//! front matter is replayed with the tool's own `localize:` section
//! dropped, the `lang:` field forced to the target language, a draft
//! marker added for every non-source language and the generated
//! `langstrings:` block inserted before the closing delimiter. The body
//! is reproduced byte-for-byte, identical across all languages.

use std::path::{Path, PathBuf};

use crate::registry::KeyRegistry;
use crate::utils::{FRONT_MATTER_DELIMITER, front_matter_end};

/// Front matter field holding the tool's own configuration; stripped
/// from every emitted file.
pub const CONFIG_FIELD: &str = "localize";

/// Name of the generated key-value block.
pub const STRINGS_FIELD: &str = "langstrings";

pub struct LocalizedEmitter<'r> {
    registry: &'r KeyRegistry,
    source_lang: &'r str,
}

impl<'r> LocalizedEmitter<'r> {
    pub fn new(registry: &'r KeyRegistry, source_lang: &'r str) -> Self {
        Self {
            registry,
            source_lang,
        }
    }

    /// Renders the complete document for one target language.
    pub fn render(&self, lines: &[String], lang: &str) -> String {
        let mut out: Vec<String> = Vec::new();
        out.push(FRONT_MATTER_DELIMITER.to_string());

        match front_matter_end(lines) {
            Some(end) => {
                let front = &lines[1..end];
                if !front.iter().any(|l| is_field(l, "lang")) {
                    out.push(format!("lang: {}", lang));
                }
                self.replay_front_matter(front, lang, &mut out);
                self.push_generated_block(lang, &mut out);
                out.push(FRONT_MATTER_DELIMITER.to_string());
                out.extend(lines[end + 1..].iter().cloned());
            }
            None => {
                // Document without front matter: synthesize a minimal one
                // so the generated block still has a home.
                out.push(format!("lang: {}", lang));
                self.push_generated_block(lang, &mut out);
                out.push(FRONT_MATTER_DELIMITER.to_string());
                out.extend(lines.iter().cloned());
            }
        }

        let mut doc = out.join("\n");
        doc.push('\n');
        doc
    }

    fn replay_front_matter(&self, front: &[String], lang: &str, out: &mut Vec<String>) {
        let mut skipping_config = false;
        for line in front {
            if skipping_config {
                if line.starts_with(' ') || line.starts_with('\t') {
                    continue;
                }
                skipping_config = false;
            }
            if is_field(line, CONFIG_FIELD) {
                skipping_config = true;
                continue;
            }
            if is_field(line, "lang") {
                out.push(format!("lang: {}", lang));
                continue;
            }
            out.push(line.clone());
        }
    }

    /// Inserted exactly once per emitted file, right before the closing
    /// delimiter: the draft marker (non-source languages only) and the
    /// generated block listing every used key in lexicographic order.
    fn push_generated_block(&self, lang: &str, out: &mut Vec<String>) {
        if lang != self.source_lang {
            out.push("draft: true".to_string());
        }
        out.push(format!("{}:", STRINGS_FIELD));
        for entry in self.registry.used_entries() {
            if lang == self.source_lang {
                out.push(format!("  {}: \"{}\"", entry.key, escape_quoted(&entry.text)));
            } else {
                out.push(format!("  {}: \"\" # {}", entry.key, entry.text));
            }
        }
    }
}

/// Escapes backslash and double quote; the value is always emitted
/// inside double quotes.
fn escape_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

fn is_field(line: &str, field: &str) -> bool {
    line.strip_prefix(field)
        .and_then(|rest| rest.strip_prefix(':'))
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
}

/// Output path for one language: `<base>.<lang>.<ext>` next to the
/// input.
pub fn output_path(input: &Path, lang: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = input
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "qmd".to_string());
    input.with_file_name(format!("{}.{}.{}", stem, lang, ext))
}
