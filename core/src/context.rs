//! View model pushed to the presentation layer.
//!
//! The `KeyboardContext` struct is a plain data container: after every key
//! event or mode transition the engine rewrites it, and the presentation
//! layer reads its fields to redraw the suggestion strip, the command bar and
//! the key layout. No callbacks or traits on the rendering side.

use crate::command_bar::CommandBarState;
use crate::shift::LayoutKind;
use crate::suggestion::SuggestionResult;

/// Everything the presentation layer needs to render the keyboard.
///
/// # Fields
///
/// - `suggestions`: full suggestion result for the trailing word
/// - `emoji_buttons`: emoji actually offered (truncated, empty when disabled)
/// - `command_bar`: prompt, typed input and placeholder of the command bar
/// - `active_layout`: letters / symbols / shifted symbols
/// - `is_shift_locked`: sticky caps
/// - `is_shifted`: next letter will be capitalised
/// - `enter_highlighted`: enter key drawn as "submit command"
/// - `status_message`: one-off message such as "Not in Wikidata"
/// - `annotation`: category of the word a space just completed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardContext {
    pub suggestions: SuggestionResult,

    pub emoji_buttons: Vec<String>,

    pub command_bar: CommandBarState,

    pub active_layout: LayoutKind,

    pub is_shift_locked: bool,

    pub is_shifted: bool,

    pub enter_highlighted: bool,

    pub status_message: Option<String>,

    pub annotation: Option<String>,
}

impl KeyboardContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear to the state of a fresh session.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Take the status message, leaving it empty.
    pub fn take_status(&mut self) -> Option<String> {
        self.status_message.take()
    }

    /// Whether the command bar is visible.
    pub fn has_command_bar(&self) -> bool {
        self.command_bar.is_visible()
    }
}
