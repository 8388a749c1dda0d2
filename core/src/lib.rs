//! scribe-core
//!
//! Linguistic input core of a software keyboard: turns key events into edits
//! of the host document or of the command bar, tracks the command mode and
//! shift state, and recomputes emoji / grammatical-category suggestions for
//! the word under the cursor after every event.
//!
//! Public API:
//! - `KeyboardEngine` - Event coordinator and mode state machine
//! - `LexiconTable` - Per-language lookup data
//! - `resolve` / `SuggestionResult` - Suggestions for a word
//! - `EditEngine` / `CommandService` - Buffer edits and command submission
//! - `ShiftTracker` - Single-tap vs. double-tap shift handling
//! - `TextCursor` - Capability the host provides for its text buffer
//! - `Config` - Configuration and feature flags
use serde::{Deserialize, Serialize};

pub mod word;
pub use word::{extract_trailing_word, is_boundary};

pub mod lexicon;
pub use lexicon::{CommandStrings, CommandTexts, InterfaceStrings, LexiconBuilder, LexiconTable};

pub mod suggestion;
pub use suggestion::{resolve, SuggestionResult};

pub mod cursor;
pub use cursor::{MemoryCursor, TextCursor, CONTEXT_CHARS};

pub mod command_bar;
pub use command_bar::{CommandBarState, CommandBuffer};

pub mod session;
pub use session::{CommandKind, EditTarget, KeyboardSession, Mode};

pub mod shift;
pub use shift::{
    determine_active_layout, Clock, LayoutAction, LayoutKind, ManualClock, ShiftTracker,
    SystemClock,
};

pub mod editor;
pub use editor::{
    CommandOutcome, CommandService, EditEngine, EditResult, NullCommandService,
    StaticCommandService,
};

pub mod context;
pub use context::KeyboardContext;

pub mod ime_engine;
pub use ime_engine::{IgnoreReason, KeyEvent, KeyResult, KeyboardEngine};

/// Keyboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Maximum gap between two shift taps that still counts as a double tap
    pub double_tap_window_ms: u64,

    /// Capitalise the first letter of a sentence automatically
    pub auto_capitalize: bool,

    /// Show emoji suggestions for the trailing word
    pub emoji_suggestions_enabled: bool,

    /// How many emoji suggestions are offered at once
    pub max_emoji_suggestions: usize,

    /// Marker drawn where the command-bar cursor sits
    pub cursor_marker: String,

    /// Separator between command labels while choosing a command
    pub command_label_separator: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            double_tap_window_ms: 300,
            auto_capitalize: true,
            emoji_suggestions_enabled: true,
            max_emoji_suggestions: 3,
            cursor_marker: "│".to_string(),
            command_label_separator: " · ".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Double-tap window as a `Duration`.
    pub fn double_tap_window(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.double_tap_window_ms)
    }
}

/// Utility helpers.
pub mod utils {
    use unicode_normalization::UnicodeNormalization;

    /// Normalize a lookup key: trim, NFC, lowercase.
    pub fn normalize_key(s: &str) -> String {
        s.trim().nfc().collect::<String>().to_lowercase()
    }
}
