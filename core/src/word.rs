//! Trailing-word extraction.
//!
//! The keyboard never keeps its own copy of the document: after every key
//! event it re-reads the text before the cursor from the host and asks this
//! module for the word the user is currently typing. That word drives emoji
//! and grammatical-category suggestions.

/// Punctuation that terminates a word.
///
/// Apostrophes and hyphens are word characters: "don't" and "well-known"
/// are single words.
pub const BOUNDARY_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '"', '(', ')', '[', ']', '{', '}', '<', '>', '/', '\\', '|',
    '«', '»', '“', '”', '„', '¿', '¡', '…',
];

/// Whether `ch` separates words.
pub fn is_boundary(ch: char) -> bool {
    ch.is_whitespace() || BOUNDARY_PUNCTUATION.contains(&ch)
}

/// Return the contiguous run of non-boundary characters at the end of
/// `text_before_cursor`.
///
/// Returns an empty string when the input is empty or ends with a boundary
/// character. Callers treat the empty word as "start of a new word" and fall
/// back to seed suggestions.
///
/// ```
/// use scribe_core::word::extract_trailing_word;
///
/// assert_eq!(extract_trailing_word("hello world"), "world");
/// assert_eq!(extract_trailing_word("hello world "), "");
/// ```
pub fn extract_trailing_word(text_before_cursor: &str) -> &str {
    let start = text_before_cursor
        .char_indices()
        .rev()
        .find(|&(_, ch)| is_boundary(ch))
        .map(|(idx, ch)| idx + ch.len_utf8())
        .unwrap_or(0);
    &text_before_cursor[start..]
}

/// Whether the text before the cursor sits at the start of a sentence.
///
/// True for empty/whitespace-only text, and for text whose last non-space
/// character is a sentence terminator that is already followed by whitespace.
pub fn is_sentence_start(text_before_cursor: &str) -> bool {
    let trimmed = text_before_cursor.trim_end();
    if trimmed.is_empty() {
        return true;
    }
    if trimmed.len() == text_before_cursor.len() {
        // No trailing whitespace yet: still inside the sentence.
        return false;
    }
    trimmed.ends_with(['.', '!', '?'])
}
