//! Command bar: the secondary input region for command arguments.
//!
//! While a command (translate / conjugate / plural) is awaiting input, typed
//! characters go to a [`CommandBuffer`] instead of the host document. The
//! text shown in the bar is derived on demand as a [`CommandBarState`] from
//! the current mode, the buffer and the active lexicon.

use crate::lexicon::LexiconTable;
use crate::session::{CommandKind, Mode};

/// Input typed after a command prompt. The cursor is always at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBuffer {
    text: String,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Remove the last character. Returns false when already empty.
    pub fn delete_before(&mut self) -> bool {
        self.text.pop().is_some()
    }

    /// Take the typed word, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

/// What the command bar shows. Derived, never stored.
///
/// `prompt_text` is non-empty exactly when the mode is not `Idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBarState {
    pub prompt_text: String,
    /// Text typed after the prompt
    pub input_text: String,
    /// Hint shown while `input_text` is empty
    pub placeholder_text: String,
    pub show_cursor_marker: bool,
}

impl CommandBarState {
    /// Derive the bar for `mode`.
    ///
    /// While choosing a command the prompt lists the command labels joined by
    /// `separator`; while awaiting input it is the command's own prompt.
    pub fn derive(mode: Mode, input: &CommandBuffer, table: &LexiconTable, separator: &str) -> Self {
        match mode {
            Mode::Idle => Self::default(),
            Mode::SelectingCommand => Self {
                prompt_text: CommandKind::ALL
                    .iter()
                    .map(|&kind| table.command(kind).label.as_str())
                    .collect::<Vec<_>>()
                    .join(separator),
                ..Self::default()
            },
            Mode::AwaitingTranslateInput | Mode::AwaitingConjugateInput | Mode::AwaitingPluralInput => {
                let Some(kind) = mode.command_kind() else {
                    return Self::default();
                };
                let strings = table.command(kind);
                Self {
                    prompt_text: strings.prompt.clone(),
                    input_text: input.text().to_string(),
                    placeholder_text: if input.is_empty() {
                        strings.placeholder.clone()
                    } else {
                        String::new()
                    },
                    show_cursor_marker: true,
                }
            }
        }
    }

    /// Whether the bar is shown at all.
    pub fn is_visible(&self) -> bool {
        !self.prompt_text.is_empty()
    }

    /// Flatten to a single line: prompt, input, cursor marker, placeholder.
    pub fn display_text(&self, cursor_marker: &str) -> String {
        let mut out = String::with_capacity(
            self.prompt_text.len() + self.input_text.len() + self.placeholder_text.len() + 4,
        );
        out.push_str(&self.prompt_text);
        out.push_str(&self.input_text);
        if self.show_cursor_marker {
            out.push_str(cursor_marker);
        }
        if !self.placeholder_text.is_empty() {
            out.push(' ');
            out.push_str(&self.placeholder_text);
        }
        out
    }
}
