//! Text-cursor capability provided by the host.
//!
//! The host text field owns the canonical document. The keyboard core only
//! talks to it through the narrow [`TextCursor`] trait and re-reads the text
//! before the cursor whenever it needs it, never caching it across events.
//!
//! [`MemoryCursor`] is a self-contained implementation backed by a `String`,
//! used by the interactive CLI and by tests.

use std::ops::Range;

/// How many characters before the cursor the keyboard reads per event. Enough
/// for the trailing word and the sentence end before it.
pub const CONTEXT_CHARS: usize = 128;

/// Operations the keyboard core may perform on the host's text buffer.
pub trait TextCursor {
    /// Up to `max_chars` characters immediately before the cursor.
    fn text_before_cursor(&self, max_chars: usize) -> String;

    /// Whether the host reports a non-empty selection.
    fn has_selection(&self) -> bool;

    /// Delete one character before the cursor.
    fn delete_backward(&mut self);

    /// Delete the selected range.
    fn delete_selection(&mut self);

    /// Insert `text` at the cursor, replacing any selection.
    fn insert_text(&mut self, text: &str);

    /// Perform the host's enter/submit action.
    fn send_enter(&mut self);
}

/// In-memory text buffer with cursor and optional selection.
///
/// Offsets are byte offsets and always lie on character boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryCursor {
    text: String,
    cursor: usize,
    selection: Option<Range<usize>>,
}

impl MemoryCursor {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `text` with the cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self {
            text,
            cursor,
            selection: None,
        }
    }

    /// Whole document.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position (byte offset).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text after the cursor.
    pub fn text_after_cursor(&self) -> &str {
        &self.text[self.cursor..]
    }

    /// Current selection, if any.
    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    /// Select `range`; the cursor moves to its end.
    /// Returns false (and changes nothing) for ranges off character boundaries.
    pub fn select(&mut self, range: Range<usize>) -> bool {
        if range.start > range.end
            || range.end > self.text.len()
            || !self.text.is_char_boundary(range.start)
            || !self.text.is_char_boundary(range.end)
        {
            return false;
        }
        self.cursor = range.end;
        self.selection = if range.is_empty() { None } else { Some(range) };
        true
    }

    /// Set the cursor position (must be at a character boundary).
    pub fn set_cursor(&mut self, pos: usize) -> bool {
        if pos <= self.text.len() && self.text.is_char_boundary(pos) {
            self.cursor = pos;
            self.selection = None;
            true
        } else {
            false
        }
    }

    /// Move cursor to the left by one character.
    pub fn move_left(&mut self) -> bool {
        match self.prev_boundary() {
            Some(prev) => self.set_cursor(prev),
            None => false,
        }
    }

    /// Move cursor to the right by one character.
    pub fn move_right(&mut self) -> bool {
        match self.text[self.cursor..].chars().next() {
            Some(ch) => self.set_cursor(self.cursor + ch.len_utf8()),
            None => false,
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(idx, _)| idx)
    }
}

impl TextCursor for MemoryCursor {
    fn text_before_cursor(&self, max_chars: usize) -> String {
        let before = &self.text[..self.cursor];
        if max_chars == 0 {
            return String::new();
        }
        let start = before
            .char_indices()
            .nth_back(max_chars - 1)
            .map_or(0, |(idx, _)| idx);
        before[start..].to_string()
    }

    fn has_selection(&self) -> bool {
        self.selection.as_ref().is_some_and(|r| !r.is_empty())
    }

    fn delete_backward(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
        self.selection = None;
    }

    fn delete_selection(&mut self) {
        if let Some(range) = self.selection.take() {
            self.cursor = range.start;
            self.text.replace_range(range, "");
        }
    }

    fn insert_text(&mut self, text: &str) {
        self.delete_selection();
        self.text.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    fn send_enter(&mut self) {
        self.insert_text("\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete() {
        let mut buf = MemoryCursor::new();
        buf.insert_text("cat");
        assert_eq!(buf.text(), "cat");
        buf.delete_backward();
        assert_eq!(buf.text(), "ca");
        assert_eq!(buf.text_before_cursor(CONTEXT_CHARS), "ca");
    }

    #[test]
    fn test_text_before_cursor_is_bounded() {
        let buf = MemoryCursor::with_text("una città");
        assert_eq!(buf.text_before_cursor(5), "città");
        assert_eq!(buf.text_before_cursor(1), "à");
        assert_eq!(buf.text_before_cursor(0), "");
        assert_eq!(buf.text_before_cursor(100), "una città");
    }

    #[test]
    fn test_delete_backward_at_start_is_noop() {
        let mut buf = MemoryCursor::new();
        buf.delete_backward();
        assert_eq!(buf.text(), "");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_multibyte_delete() {
        let mut buf = MemoryCursor::with_text("città");
        buf.delete_backward();
        assert_eq!(buf.text(), "citt");
        let mut buf = MemoryCursor::with_text("hi 🐱");
        buf.delete_backward();
        assert_eq!(buf.text(), "hi ");
    }

    #[test]
    fn test_cursor_in_middle() {
        let mut buf = MemoryCursor::with_text("held");
        assert!(buf.move_left());
        buf.insert_text("l");
        assert_eq!(buf.text(), "helld");
        assert_eq!(buf.text_before_cursor(CONTEXT_CHARS), "hell");
        assert_eq!(buf.text_after_cursor(), "d");
        assert!(buf.move_right());
        assert!(!buf.move_right());
    }

    #[test]
    fn test_selection_delete_and_replace() {
        let mut buf = MemoryCursor::with_text("I have a cat");
        assert!(buf.select(2..7));
        assert!(buf.has_selection());
        buf.delete_selection();
        assert_eq!(buf.text(), "I a cat");
        assert!(!buf.has_selection());

        assert!(buf.select(4..7));
        buf.insert_text("dog");
        assert_eq!(buf.text(), "I a dog");
    }

    #[test]
    fn test_select_rejects_invalid_range() {
        let mut buf = MemoryCursor::with_text("città");
        assert!(!buf.select(0..5));
        assert!(!buf.select(0..42));
        assert!(!buf.has_selection());
    }

    #[test]
    fn test_send_enter_inserts_newline() {
        let mut buf = MemoryCursor::with_text("line");
        buf.send_enter();
        assert_eq!(buf.text(), "line\n");
    }
}
