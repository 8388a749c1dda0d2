//! scribe-languages crate root
//!
//! Built-in lexicon tables for `scribe-core` plus factory functions that
//! assemble a ready `KeyboardEngine` for a language.
//!
//! Public API exported here:
//! - `Language` selector
//! - `lexicon()` and `demo_command_service()` per language
//! - `create_keyboard_engine*` factories
//! - `script` for driving an engine from text key scripts

pub mod english;
pub mod italian;
pub mod script;

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

// Re-export the core types callers need alongside the factories.
pub use scribe_core::{
    CommandKind, CommandOutcome, CommandService, Config, KeyEvent, KeyResult, KeyboardContext,
    KeyboardEngine, LexiconTable, MemoryCursor, Mode, StaticCommandService, TextCursor,
};
pub use script::{parse_script, ActionResult, ScriptAction};

/// Languages shipped with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Language {
    #[default]
    #[value(name = "en")]
    English,
    #[value(name = "it")]
    Italian,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Italian];

    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Italian => "it",
        }
    }

    /// Look a language up by code or name, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "it" | "italian" | "italiano" => Some(Language::Italian),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Lexicon table of `language`. Tables are built once and shared.
pub fn lexicon(language: Language) -> Result<Arc<LexiconTable>> {
    match language {
        Language::English => english::table(),
        Language::Italian => italian::table(),
    }
}

/// Small in-memory command data set for `language`.
pub fn demo_command_service(language: Language) -> Result<StaticCommandService> {
    let data = match language {
        Language::English => english::COMMAND_DATA,
        Language::Italian => italian::COMMAND_DATA,
    };
    StaticCommandService::from_toml_str(data)
}

/// Keyboard for `language` backed by the demo command data.
pub fn create_keyboard_engine<C: TextCursor>(
    language: Language,
    config: Config,
) -> Result<KeyboardEngine<C>> {
    let service = Arc::new(demo_command_service(language)?);
    create_keyboard_engine_with_service(language, service, config)
}

/// Keyboard for `language` answering commands through `service`.
pub fn create_keyboard_engine_with_service<C: TextCursor>(
    language: Language,
    service: Arc<dyn CommandService>,
    config: Config,
) -> Result<KeyboardEngine<C>> {
    let table = lexicon(language)?;
    debug!(%language, emoji = table.emoji_len(), categories = table.category_len(), "keyboard created");
    Ok(KeyboardEngine::new(table, service, config))
}

/// English keyboard over an in-memory buffer, default configuration.
pub fn create_keyboard_engine_english() -> Result<KeyboardEngine<MemoryCursor>> {
    create_keyboard_engine(Language::English, Config::default())
}

/// Italian keyboard over an in-memory buffer, default configuration.
pub fn create_keyboard_engine_italian() -> Result<KeyboardEngine<MemoryCursor>> {
    create_keyboard_engine(Language::Italian, Config::default())
}
