//! Single-pass document scanner.
//!
//! Walks the raw document top to bottom, tracking whether the cursor is
//! inside front matter, inside a fenced code block or buffering a
//! multi-line directive, and dispatches each line to the front matter
//! transformer, the content classifier or the directive rewriter. The
//! scan produces the rewritten line sequence shared by every language
//! emission, and is the single place where "used" status of a key
//! becomes authoritative.

pub mod classify;
pub mod directive;
pub mod front_matter;

use std::sync::LazyLock;

use regex::Regex;

use crate::registry::KeyRegistry;
use crate::utils::FRONT_MATTER_DELIMITER;
use classify::{LineKind, classify, referenced_keys, rewrite_header, rewrite_prose};
use directive::DirectiveRewriter;

static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([A-Za-z_][\w-]*):").unwrap());

static DIRECTIVE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\{\{<\s*([A-Za-z_][\w-]*)").unwrap());

/// Transient per-document scan state.
#[derive(Debug, Default)]
pub struct ScanState {
    pub in_front_matter: bool,
    pub in_code_block: bool,
    pub current_front_matter_key: Option<String>,
    directive_buffer: Vec<String>,
    delimiters_seen: u8,
}

pub struct DocumentScanner<'r> {
    registry: &'r mut KeyRegistry,
    directives: DirectiveRewriter,
    state: ScanState,
    lines: Vec<String>,
}

impl<'r> DocumentScanner<'r> {
    pub fn new(registry: &'r mut KeyRegistry) -> Self {
        Self {
            registry,
            directives: DirectiveRewriter::new(),
            state: ScanState::default(),
            lines: Vec::new(),
        }
    }

    /// Scans the whole document and returns the rewritten line sequence.
    pub fn scan(mut self, input: &[String]) -> Vec<String> {
        for (idx, line) in input.iter().enumerate() {
            self.scan_line(idx, line);
        }
        // A never-closed directive cannot be parsed as a unit; its
        // buffered lines are emitted untouched.
        let leftover = std::mem::take(&mut self.state.directive_buffer);
        for line in leftover {
            self.emit(&line);
        }
        self.lines
    }

    fn scan_line(&mut self, idx: usize, line: &str) {
        if !self.state.directive_buffer.is_empty() {
            self.state.directive_buffer.push(line.to_string());
            if line.contains(">}}") {
                self.flush_directive_buffer();
            }
            return;
        }

        if line.trim_end() == FRONT_MATTER_DELIMITER {
            if self.state.delimiters_seen == 0 && idx == 0 {
                self.state.delimiters_seen = 1;
                self.state.in_front_matter = true;
                self.emit(line);
                return;
            }
            if self.state.delimiters_seen == 1 {
                self.state.delimiters_seen = 2;
                self.state.in_front_matter = false;
                self.emit(line);
                return;
            }
        }

        if self.state.in_front_matter {
            if let Some(caps) = FIELD_RE.captures(line) {
                self.state.current_front_matter_key = Some(caps[1].to_string());
            }
            let out = front_matter::transform_line(
                line,
                self.state.current_front_matter_key.as_deref(),
                self.registry,
            );
            self.emit(&out);
            return;
        }

        if line.trim_start().starts_with("```") {
            self.state.in_code_block = !self.state.in_code_block;
            self.emit(line);
            return;
        }

        if !self.state.in_code_block
            && DIRECTIVE_NAME_RE.is_match(line)
            && !line.contains(">}}")
        {
            self.state.directive_buffer.push(line.to_string());
            return;
        }

        let out = match classify(line, self.state.in_code_block) {
            LineKind::Header { marker, text } => rewrite_header(&marker, &text, self.registry)
                .unwrap_or_else(|| line.to_string()),
            LineKind::Directive { name } => self.directives.rewrite(line, &name, self.registry),
            LineKind::Prose => {
                rewrite_prose(line, self.registry).unwrap_or_else(|| line.to_string())
            }
            LineKind::CodeVerbatim
            | LineKind::AlreadyKeyed
            | LineKind::Structural
            | LineKind::Passthrough => line.to_string(),
        };
        self.emit(&out);
    }

    fn flush_directive_buffer(&mut self) {
        let buffer = std::mem::take(&mut self.state.directive_buffer);
        let name = DIRECTIVE_NAME_RE
            .captures(&buffer[0])
            .map(|c| c[1].to_string())
            .unwrap_or_default();
        let raw = buffer.join("\n");
        let rewritten = self.directives.rewrite(&raw, &name, self.registry);
        self.emit(&rewritten);
    }

    /// Appends text to the output, marking every key it references as
    /// used. All output funnels through here.
    fn emit(&mut self, text: &str) {
        for key in referenced_keys(text) {
            self.registry.mark_used(&key);
        }
        for line in text.split('\n') {
            self.lines.push(line.to_string());
        }
    }
}
