//! Per-language lexicon tables.
//!
//! A `LexiconTable` holds everything language-specific the keyboard core
//! needs: word → emoji keyword sets, word → grammatical category, the fixed
//! strings of the three commands, interface messages and seed suggestions.
//! Tables are built once (in code or from a TOML/JSON document) and then
//! shared read-only, usually behind an `Arc`.
//!
//! Lookup keys are normalised at build time (NFC + lowercase), so lookups
//! are case-insensitive and cost one normalisation plus one hash probe.

use std::collections::BTreeMap;
use std::path::Path;

use ahash::AHashMap;
use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::session::CommandKind;
use crate::utils::normalize_key;

/// Label, placeholder and prompt of one command kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandStrings {
    /// Button label shown while choosing a command (e.g. "Translate")
    pub label: String,
    /// Hint shown while the command input is still empty
    pub placeholder: String,
    /// Text preceding the command input (e.g. "Plural: ")
    pub prompt: String,
}

impl CommandStrings {
    pub fn new(
        label: impl Into<String>,
        placeholder: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            placeholder: placeholder.into(),
            prompt: prompt.into(),
        }
    }
}

/// Strings for all three command kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandTexts {
    pub translate: CommandStrings,
    pub conjugate: CommandStrings,
    pub plural: CommandStrings,
}

impl CommandTexts {
    pub fn get(&self, kind: CommandKind) -> &CommandStrings {
        match kind {
            CommandKind::Translate => &self.translate,
            CommandKind::Conjugate => &self.conjugate,
            CommandKind::Plural => &self.plural,
        }
    }
}

/// Interface messages and labels that are not tied to a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceStrings {
    /// Label drawn on the space bar
    pub space_bar: String,
    /// Shown when a command finds nothing for the submitted word
    pub invalid_command: String,
    /// Shown when pluralising a word that is already plural
    pub already_plural: String,
    /// Primary currency symbol of the locale
    pub currency_symbol: String,
    /// Long-press alternates of the currency key
    pub currency_alternates: Vec<String>,
}

/// Serialized form of a lexicon table.
#[derive(Debug, Deserialize)]
struct LexiconDocument {
    language: String,
    code: String,
    #[serde(default)]
    strings: InterfaceStrings,
    commands: CommandTexts,
    #[serde(default)]
    seed_suggestions: Vec<String>,
    #[serde(default)]
    numeric_suggestions: Vec<String>,
    #[serde(default)]
    emoji: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    categories: BTreeMap<String, String>,
}

/// Immutable per-language lookup data.
#[derive(Debug, Clone)]
pub struct LexiconTable {
    language: String,
    code: String,
    strings: InterfaceStrings,
    commands: CommandTexts,
    seed_suggestions: Vec<String>,
    numeric_suggestions: Vec<String>,
    emoji: AHashMap<String, Vec<String>>,
    categories: AHashMap<String, String>,
}

impl LexiconTable {
    /// Start building a table for `language` (display name) with ISO `code`.
    pub fn builder(language: impl Into<String>, code: impl Into<String>) -> LexiconBuilder {
        LexiconBuilder::new(language, code)
    }

    /// Display name of the language (e.g. "English").
    pub fn language(&self) -> &str {
        &self.language
    }

    /// ISO code of the language (e.g. "en").
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn strings(&self) -> &InterfaceStrings {
        &self.strings
    }

    pub fn commands(&self) -> &CommandTexts {
        &self.commands
    }

    /// Strings for a single command kind.
    pub fn command(&self, kind: CommandKind) -> &CommandStrings {
        self.commands.get(kind)
    }

    /// Suggestions offered when no word is being typed.
    pub fn seed_suggestions(&self) -> &[String] {
        &self.seed_suggestions
    }

    /// Suggestions offered after a number.
    pub fn numeric_suggestions(&self) -> &[String] {
        &self.numeric_suggestions
    }

    /// Emoji keyword set for `word`, in declared order.
    pub fn emoji_for(&self, word: &str) -> Option<&[String]> {
        self.emoji.get(&normalize_key(word)).map(Vec::as_slice)
    }

    /// Grammatical category label for `word`.
    pub fn category_for(&self, word: &str) -> Option<&str> {
        self.categories.get(&normalize_key(word)).map(String::as_str)
    }

    /// Number of words with emoji keywords.
    pub fn emoji_len(&self) -> usize {
        self.emoji.len()
    }

    /// Number of words with a grammatical category.
    pub fn category_len(&self) -> usize {
        self.categories.len()
    }

    /// Parse a table from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let doc: LexiconDocument = toml::from_str(content).context("parse lexicon TOML")?;
        Self::from_document(doc)
    }

    /// Parse a table from a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let doc: LexiconDocument = serde_json::from_str(content).context("parse lexicon JSON")?;
        Self::from_document(doc)
    }

    /// Load a table from disk; the format is chosen by file extension
    /// (`.toml` or `.json`).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read lexicon {}", path.display()))?;
        let table = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => bail!(
                "unsupported lexicon format {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ),
        }
        .with_context(|| format!("load lexicon {}", path.display()))?;
        debug!(
            path = %path.display(),
            language = table.language(),
            emoji = table.emoji_len(),
            categories = table.category_len(),
            "loaded lexicon"
        );
        Ok(table)
    }

    fn from_document(doc: LexiconDocument) -> Result<Self> {
        let mut builder = LexiconBuilder::new(doc.language, doc.code)
            .strings(doc.strings)
            .commands(doc.commands)
            .seed_suggestions(doc.seed_suggestions)
            .numeric_suggestions(doc.numeric_suggestions);
        for (word, emojis) in doc.emoji {
            builder = builder.emoji(&word, emojis);
        }
        for (word, category) in doc.categories {
            builder = builder.category(&word, category);
        }
        builder.try_build()
    }
}

/// Incremental constructor for [`LexiconTable`].
#[derive(Debug, Clone)]
pub struct LexiconBuilder {
    table: LexiconTable,
}

impl LexiconBuilder {
    fn new(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            table: LexiconTable {
                language: language.into(),
                code: code.into(),
                strings: InterfaceStrings::default(),
                commands: CommandTexts::default(),
                seed_suggestions: Vec::new(),
                numeric_suggestions: Vec::new(),
                emoji: AHashMap::new(),
                categories: AHashMap::new(),
            },
        }
    }

    pub fn strings(mut self, strings: InterfaceStrings) -> Self {
        self.table.strings = strings;
        self
    }

    pub fn commands(mut self, commands: CommandTexts) -> Self {
        self.table.commands = commands;
        self
    }

    pub fn command(mut self, kind: CommandKind, strings: CommandStrings) -> Self {
        match kind {
            CommandKind::Translate => self.table.commands.translate = strings,
            CommandKind::Conjugate => self.table.commands.conjugate = strings,
            CommandKind::Plural => self.table.commands.plural = strings,
        }
        self
    }

    pub fn seed_suggestions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table.seed_suggestions = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn numeric_suggestions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table.numeric_suggestions = words.into_iter().map(Into::into).collect();
        self
    }

    /// Attach emoji to `word`. Words differing only in case share one entry;
    /// later emoji are appended after earlier ones, duplicates dropped.
    pub fn emoji<I, S>(mut self, word: &str, emojis: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.table.emoji.entry(normalize_key(word)).or_default();
        for emoji in emojis {
            let emoji = emoji.into();
            if !emoji.is_empty() && !entry.contains(&emoji) {
                entry.push(emoji);
            }
        }
        self
    }

    /// Set the grammatical category of `word`; a later call overrides.
    pub fn category(mut self, word: &str, category: impl Into<String>) -> Self {
        self.table
            .categories
            .insert(normalize_key(word), category.into());
        self
    }

    /// Validate and finish the table.
    ///
    /// Every command needs a prompt: the command bar must never be blank
    /// while a command is in progress.
    pub fn try_build(mut self) -> Result<LexiconTable> {
        ensure!(!self.table.language.is_empty(), "lexicon has no language name");
        for kind in CommandKind::ALL {
            let strings = self.table.commands.get(kind);
            ensure!(
                !strings.prompt.is_empty(),
                "{} lexicon: {:?} command has an empty prompt",
                self.table.language,
                kind
            );
            ensure!(
                !strings.label.is_empty(),
                "{} lexicon: {:?} command has an empty label",
                self.table.language,
                kind
            );
        }
        self.table.emoji.retain(|_, emojis| !emojis.is_empty());
        Ok(self.table)
    }
}
