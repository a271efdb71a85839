//! Common utility functions shared across the codebase.

/// Front matter delimiter line in Quarto documents.
pub const FRONT_MATTER_DELIMITER: &str = "---";

/// Checks if the text contains at least one word character
/// (Unicode letter or digit).
///
/// Returns false for empty strings, pure punctuation, or whitespace.
///
/// # Examples
///
/// ```
/// use qlot::utils::contains_word;
///
/// assert!(contains_word("Hello"));
/// assert!(contains_word("你好"));
/// assert!(contains_word("123"));
/// assert!(!contains_word("---"));
/// assert!(!contains_word("!@#"));
/// assert!(!contains_word(""));
/// ```
pub fn contains_word(text: &str) -> bool {
    text.chars().any(|c| c.is_alphanumeric())
}

/// Strips one layer of matching surrounding quotes (single or double).
///
/// Unmatched or absent quotes leave the input untouched.
pub fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Returns the index of the closing front matter delimiter, if the
/// document opens with one.
///
/// The document must start with a delimiter line for front matter to be
/// recognized at all; a `---` divider later in the body never counts.
/// Both delimiters tolerate trailing whitespace, matching the scanner.
pub fn front_matter_end(lines: &[String]) -> Option<usize> {
    if lines.first().map(|l| l.trim_end()) != Some(FRONT_MATTER_DELIMITER) {
        return None;
    }
    lines
        .iter()
        .skip(1)
        .position(|l| l.trim_end() == FRONT_MATTER_DELIMITER)
        .map(|i| i + 1)
}
