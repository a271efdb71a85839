//! Shortcode directive rewriting.
//!
//! Directive blocks look like `{{< video url="https://x" title="Intro" >}}`
//! and may span several lines. Double-quoted attribute values are
//! candidates for extraction and get replaced with a `t:<key>` reference;
//! single-quoted values are the author's escape hatch and are never
//! touched. A block with at least one rewritten value is reformatted with
//! one attribute per line, names column-aligned.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use unicode_width::UnicodeWidthStr;

use crate::registry::KeyRegistry;

static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*\{\{<\s*([A-Za-z_][\w-]*)\s+(.*?)\s*>\}\}\s*$").unwrap()
});

static ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z_][\w.-]*)\s*=\s*("[^"]*"|'[^']*')"#).unwrap());

#[derive(Debug)]
struct Attribute {
    name: String,
    quote: char,
    value: String,
}

/// Rewrites directive blocks, tracking which raw blocks were already
/// handled so re-examined buffered content is never rewritten twice.
#[derive(Debug, Default)]
pub struct DirectiveRewriter {
    rewritten: HashSet<String>,
}

impl DirectiveRewriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrites one directive block, returning the input unchanged when
    /// there is nothing to translate or the block cannot be parsed
    /// cleanly. Malformed attribute syntax (unmatched quotes, stray
    /// tokens) always degrades to pass-through, never an error.
    pub fn rewrite(&mut self, block: &str, directive_type: &str, registry: &mut KeyRegistry) -> String {
        if self.rewritten.contains(block) {
            return block.to_string();
        }
        let Some(caps) = BLOCK_RE.captures(block) else {
            return block.to_string();
        };
        let inner = caps.get(2).map_or("", |m| m.as_str());

        let Some(mut attrs) = parse_attributes(inner) else {
            return block.to_string();
        };

        let mut changed = false;
        for attr in &mut attrs {
            if attr.quote != '"' {
                continue;
            }
            // Inline shortcode escapes and existing references stay put.
            if attr.value.starts_with("t:") || attr.value.contains("{{<") {
                continue;
            }
            if let Some(key) = registry.register(&attr.value, directive_type) {
                registry.mark_used(&key);
                attr.value = format!("t:{}", key);
                changed = true;
            }
        }

        if !changed {
            return block.to_string();
        }
        self.rewritten.insert(block.to_string());
        format_block(directive_type, &attrs)
    }
}

/// Parses `name="value"` / `name='value'` pairs, requiring the whole
/// inner text to be covered. Leftover non-whitespace (positional args,
/// unbalanced quotes) means the block is ambiguous and `None` is
/// returned.
fn parse_attributes(inner: &str) -> Option<Vec<Attribute>> {
    let mut attrs = Vec::new();
    let mut cursor = 0;
    for caps in ATTR_RE.captures_iter(inner) {
        let whole = caps.get(0).unwrap();
        if !inner[cursor..whole.start()].trim().is_empty() {
            return None;
        }
        cursor = whole.end();

        let quoted = caps.get(2).unwrap().as_str();
        let quote = quoted.chars().next().unwrap();
        attrs.push(Attribute {
            name: caps[1].to_string(),
            quote,
            value: quoted[1..quoted.len() - 1].to_string(),
        });
    }
    if !inner[cursor..].trim().is_empty() || attrs.is_empty() {
        return None;
    }
    Some(attrs)
}

fn format_block(directive_type: &str, attrs: &[Attribute]) -> String {
    let width = attrs
        .iter()
        .map(|a| UnicodeWidthStr::width(a.name.as_str()))
        .max()
        .unwrap_or(0);

    let mut out = format!("{{{{< {}", directive_type);
    for attr in attrs {
        let pad = " ".repeat(width - UnicodeWidthStr::width(attr.name.as_str()));
        out.push_str(&format!(
            "\n  {}{}={}{}{}",
            attr.name, pad, attr.quote, attr.value, attr.quote
        ));
    }
    out.push_str("\n>}}");
    out
}
