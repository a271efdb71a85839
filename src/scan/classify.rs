//! Per-line classification of document body content.
//!
//! `classify` is a pure function mapping one line to a `LineKind`; the
//! rewrite helpers that actually mutate the registry live alongside it.
//! Rules are evaluated in a fixed priority order: code-verbatim, then
//! already-keyed, header, directive opener, structural marker, prose.

use std::sync::LazyLock;

use regex::Regex;

use crate::registry::KeyRegistry;
use crate::utils::contains_word;

/// Matches a `{{< meta langstrings.<key> >}}` reference.
static META_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{<\s*meta\s+langstrings\.([A-Za-z0-9_]+)\s*>\}\}").unwrap());

/// Matches a quoted `t:<key>` directive-attribute reference.
static ATTR_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["']t:([A-Za-z0-9_]+)["']"#).unwrap());

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

static DIRECTIVE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\{\{<\s*([A-Za-z_][\w-]*)").unwrap());

static FIELD_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][\w-]*:(\s|$)").unwrap());

/// What one body line is, before any rewriting happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Inside a fenced code block, copied verbatim.
    CodeVerbatim,
    /// Already contains a key reference; usage is re-confirmed only.
    AlreadyKeyed,
    Header { marker: String, text: String },
    /// Opens a directive block; the scanner decides single vs multi-line.
    Directive { name: String },
    /// Divider, fence, table or fenced-div marker.
    Structural,
    Prose,
    Passthrough,
}

pub fn classify(line: &str, in_code_block: bool) -> LineKind {
    if in_code_block {
        return LineKind::CodeVerbatim;
    }
    if META_REF_RE.is_match(line) {
        return LineKind::AlreadyKeyed;
    }
    if let Some(caps) = HEADER_RE.captures(line) {
        let text = caps[2].trim_end().to_string();
        if contains_word(&text) {
            return LineKind::Header {
                marker: caps[1].to_string(),
                text,
            };
        }
    }
    if let Some(caps) = DIRECTIVE_OPEN_RE.captures(line) {
        return LineKind::Directive {
            name: caps[1].to_string(),
        };
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Passthrough;
    }
    if is_structural_marker(trimmed) {
        return LineKind::Structural;
    }
    if FIELD_LINE_RE.is_match(line) {
        return LineKind::Passthrough;
    }
    if contains_word(line) {
        return LineKind::Prose;
    }
    LineKind::Passthrough
}

fn is_structural_marker(trimmed: &str) -> bool {
    trimmed.starts_with(":::")
        || trimmed.starts_with("---")
        || trimmed.starts_with("***")
        || trimmed.starts_with("```")
        || trimmed.starts_with('|')
}

/// Builds the in-document substitution for a key.
pub fn meta_reference(key: &str) -> String {
    format!("{{{{< meta langstrings.{} >}}}}", key)
}

/// Keys referenced anywhere in a piece of emitted text.
pub fn referenced_keys(text: &str) -> Vec<String> {
    let mut keys: Vec<String> = META_REF_RE
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect();
    keys.extend(ATTR_REF_RE.captures_iter(text).map(|c| c[1].to_string()));
    keys
}

pub fn rewrite_header(marker: &str, text: &str, registry: &mut KeyRegistry) -> Option<String> {
    registry
        .register(text, "header")
        .map(|key| format!("{} {}", marker, meta_reference(&key)))
}

/// Replaces a whole prose line with a reference. Extraction is
/// line-granular: a wrapped paragraph yields one key per physical line.
pub fn rewrite_prose(line: &str, registry: &mut KeyRegistry) -> Option<String> {
    registry
        .register(line, "para")
        .map(|key| meta_reference(&key))
}
