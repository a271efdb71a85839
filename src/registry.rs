//! Key registry: stable key generation and text deduplication.
//!
//! One registry is owned by a single extraction run. Keys are derived
//! from a context tag plus a slug of the text, with numeric suffixes
//! resolving collisions. Identical text always reuses the key minted for
//! its first occurrence, so re-registering never grows the registry.

use std::collections::HashMap;

use crate::utils::contains_word;

/// Raw slugs longer than this get truncated.
const SLUG_MAX: usize = 50;
/// Length that over-long slugs are truncated to.
const SLUG_TRUNCATED: usize = 40;

/// One extracted piece of translatable text.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub key: String,
    pub text: String,
    /// Set once a reference to `key` is actually emitted into the
    /// rewritten document. Keys never referenced are dropped from the
    /// generated block.
    pub used: bool,
}

#[derive(Debug, Default)]
pub struct KeyRegistry {
    entries: Vec<RegistryEntry>,
    by_key: HashMap<String, usize>,
    by_text: HashMap<String, usize>,
}

/// Builds a key-safe slug from arbitrary text.
///
/// Lowercases, collapses every non-alphanumeric run into a single
/// underscore and trims the ends. Empty results fall back to `"text"`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() {
            slug.push(c);
            in_run = false;
        } else if !in_run {
            slug.push('_');
            in_run = true;
        }
    }
    let mut slug = slug.trim_matches('_').to_string();
    if slug.is_empty() {
        slug = "text".to_string();
    }
    if slug.chars().count() > SLUG_MAX {
        slug = slug.chars().take(SLUG_TRUNCATED).collect();
        slug = slug.trim_end_matches('_').to_string();
    }
    slug
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a piece of text under a context tag and returns its key.
    ///
    /// Returns `None` for empty text or text without a single word
    /// character (nothing worth translating). Exact text seen before
    /// returns the existing key without minting a new one. This never
    /// fails: a bad span must not abort the scan of the whole document.
    pub fn register(&mut self, text: &str, context: &str) -> Option<String> {
        if text.is_empty() || !contains_word(text) {
            return None;
        }
        if let Some(&idx) = self.by_text.get(text) {
            return Some(self.entries[idx].key.clone());
        }

        let base = format!("{}_{}", context, slugify(text));
        let mut key = base.clone();
        let mut suffix = 2;
        while self.by_key.contains_key(&key) {
            key = format!("{}_{}", base, suffix);
            suffix += 1;
        }

        let idx = self.entries.len();
        self.entries.push(RegistryEntry {
            key: key.clone(),
            text: text.to_string(),
            used: false,
        });
        self.by_key.insert(key.clone(), idx);
        self.by_text.insert(text.to_string(), idx);
        Some(key)
    }

    /// Records that a reference to `key` was emitted. Unknown keys are a
    /// no-op.
    pub fn mark_used(&mut self, key: &str) {
        if let Some(&idx) = self.by_key.get(key) {
            self.entries[idx].used = true;
        }
    }

    /// Looks up the original text for a key.
    pub fn text_for(&self, key: &str) -> Option<&str> {
        self.by_key
            .get(key)
            .map(|&idx| self.entries[idx].text.as_str())
    }

    /// All entries that were actually referenced, in lexicographic key
    /// order. This is exactly the set the generated block lists.
    pub fn used_entries(&self) -> Vec<&RegistryEntry> {
        let mut used: Vec<_> = self.entries.iter().filter(|e| e.used).collect();
        used.sort_by(|a, b| a.key.cmp(&b.key));
        used
    }

    pub fn used_count(&self) -> usize {
        self.entries.iter().filter(|e| e.used).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("A Quarto report"), "a_quarto_report");
        assert_eq!(slugify("Hello, World!"), "hello_world");
        assert_eq!(slugify("  spaced  out  "), "spaced_out");
    }

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify("a -- b ?? c"), "a_b_c");
    }

    #[test]
    fn test_slugify_empty_falls_back() {
        assert_eq!(slugify(""), "text");
        assert_eq!(slugify("!!!"), "text");
    }

    #[test]
    fn test_slugify_truncates_long_text() {
        let long = "word ".repeat(20);
        let slug = slugify(&long);
        assert!(slug.chars().count() <= 40);
        assert!(!slug.ends_with('_'));
        assert!(slug.starts_with("word_word"));
    }

    #[test]
    fn test_slugify_keeps_borderline_length() {
        // 49 chars: under the cap, left alone
        let text = "abcde ".repeat(8) + "a";
        let slug = slugify(&text);
        assert_eq!(slug.chars().count(), 49);
    }

    #[test]
    fn test_register_basic() {
        let mut reg = KeyRegistry::new();
        let key = reg.register("Introduction", "header").unwrap();
        assert_eq!(key, "header_introduction");
        assert_eq!(reg.text_for(&key), Some("Introduction"));
    }

    #[test]
    fn test_register_rejects_empty_and_symbolic() {
        let mut reg = KeyRegistry::new();
        assert_eq!(reg.register("", "para"), None);
        assert_eq!(reg.register("---", "para"), None);
        assert_eq!(reg.register("   ", "para"), None);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut reg = KeyRegistry::new();
        let first = reg.register("Welcome.", "para").unwrap();
        let second = reg.register("Welcome.", "para").unwrap();
        assert_eq!(first, second);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_register_resolves_collisions_with_suffix() {
        let mut reg = KeyRegistry::new();
        let a = reg.register("Intro!", "para").unwrap();
        let b = reg.register("Intro?", "para").unwrap();
        let c = reg.register("Intro.", "para").unwrap();
        assert_eq!(a, "para_intro");
        assert_eq!(b, "para_intro_2");
        assert_eq!(c, "para_intro_3");
    }

    #[test]
    fn test_distinct_texts_never_share_a_key() {
        let mut reg = KeyRegistry::new();
        let mut keys = std::collections::HashSet::new();
        for text in ["a!", "a?", "a.", "b", "a,"] {
            assert!(keys.insert(reg.register(text, "para").unwrap()));
        }
    }

    #[test]
    fn test_mark_used_and_used_entries() {
        let mut reg = KeyRegistry::new();
        let a = reg.register("Zebra", "para").unwrap();
        let _b = reg.register("Apple", "para").unwrap();
        let c = reg.register("Mango", "meta").unwrap();
        reg.mark_used(&a);
        reg.mark_used(&c);
        reg.mark_used("no_such_key");

        let used: Vec<_> = reg.used_entries().iter().map(|e| e.key.clone()).collect();
        assert_eq!(used, vec!["meta_mango", "para_zebra"]);
        assert_eq!(reg.used_count(), 2);
    }
}
