//! Line-level rewriting of the YAML front matter block.
//!
//! Only a fixed allow-list of metadata fields is translatable. Scalar
//! values and quoted list items under those fields are registered and
//! replaced with a `{{< meta langstrings.<key> >}}` reference; every
//! other line passes through unchanged.

use std::sync::LazyLock;

use regex::Regex;

use crate::registry::KeyRegistry;
use crate::scan::classify::meta_reference;
use crate::utils::{contains_word, strip_quotes};

/// Metadata fields whose values are worth translating.
pub const TRANSLATABLE_FIELDS: &[&str] = &[
    "title",
    "description",
    "subtitle",
    "author",
    "abstract",
    "keywords",
    "summary",
    "caption",
    "alt",
    "label",
];

static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(\s*)-\s+"(.*)"\s*$"#).unwrap());

static SCALAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_][\w-]*):\s*(.*\S)\s*$").unwrap());

pub fn is_translatable_field(field: &str) -> bool {
    TRANSLATABLE_FIELDS.contains(&field)
}

/// Transforms one front matter line. `current_field` is the most recent
/// top-level field name, used to attribute list items to a field.
pub fn transform_line(
    line: &str,
    current_field: Option<&str>,
    registry: &mut KeyRegistry,
) -> String {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return line.to_string();
    }

    if let Some(caps) = LIST_ITEM_RE.captures(line) {
        let content = caps[2].to_string();
        let under_translatable = current_field.is_some_and(is_translatable_field);
        if under_translatable && contains_word(&content) && !content.contains("{{<") {
            if let Some(key) = registry.register(&content, "meta") {
                return format!("{}- \"{}\"", &caps[1], meta_reference(&key));
            }
        }
        return line.to_string();
    }

    if let Some(caps) = SCALAR_RE.captures(line) {
        let field = caps[1].to_string();
        if is_translatable_field(&field) {
            let value = strip_quotes(&caps[2]);
            if contains_word(value) && !value.contains("{{<") {
                if let Some(key) = registry.register(value, "meta") {
                    return format!("{}: \"{}\"", field, meta_reference(&key));
                }
            }
        }
        return line.to_string();
    }

    line.to_string()
}
