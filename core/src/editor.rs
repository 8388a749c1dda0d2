//! Edit engine: applies delete / enter / insert to the active buffer.
//!
//! The buffer an edit lands in is picked from the mode: the host document
//! (through the [`TextCursor`]) while idle or choosing a command, the
//! command bar's [`CommandBuffer`] while a command awaits input.
//!
//! Submitting a command hands the typed word to a [`CommandService`]; the
//! edit engine only sequences that call, inserts a found result into the
//! document and clears the command input. Returning to `Idle` is up to the
//! caller.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::command_bar::CommandBuffer;
use crate::cursor::TextCursor;
use crate::ime_engine::IgnoreReason;
use crate::session::{CommandKind, EditTarget, Mode};
use crate::utils::normalize_key;

// ============================================================================
// Command service
// ============================================================================

/// Result of running a command on a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Text to insert into the document
    Found(String),
    /// No data for the word
    NotFound,
    /// Plural requested for a word that is already plural
    AlreadyPlural,
}

/// Language-data service that answers translate / conjugate / plural.
pub trait CommandService {
    fn execute(&self, kind: CommandKind, word: &str) -> CommandOutcome;
}

/// Service that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCommandService;

impl CommandService for NullCommandService {
    fn execute(&self, _kind: CommandKind, _word: &str) -> CommandOutcome {
        CommandOutcome::NotFound
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CommandDocument {
    translate: BTreeMap<String, String>,
    conjugate: BTreeMap<String, String>,
    plural: BTreeMap<String, String>,
}

/// In-memory command data keyed by (kind, normalised word).
///
/// A plural request for a word that is itself a known plural form yields
/// [`CommandOutcome::AlreadyPlural`].
#[derive(Debug, Clone, Default)]
pub struct StaticCommandService {
    entries: AHashMap<(CommandKind, String), String>,
    plural_forms: AHashSet<String>,
}

impl StaticCommandService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a result for `word` under `kind`.
    pub fn with_entry(mut self, kind: CommandKind, word: &str, result: impl Into<String>) -> Self {
        self.insert(kind, word, result);
        self
    }

    pub fn insert(&mut self, kind: CommandKind, word: &str, result: impl Into<String>) {
        let result = result.into();
        if kind == CommandKind::Plural {
            self.plural_forms.insert(normalize_key(&result));
        }
        self.entries.insert((kind, normalize_key(word)), result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse `[translate]`, `[conjugate]` and `[plural]` word tables from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let doc: CommandDocument = toml::from_str(content).context("parse command data TOML")?;
        let mut service = Self::new();
        for (kind, table) in [
            (CommandKind::Translate, doc.translate),
            (CommandKind::Conjugate, doc.conjugate),
            (CommandKind::Plural, doc.plural),
        ] {
            for (word, result) in table {
                service.insert(kind, &word, result);
            }
        }
        Ok(service)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read command data {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("load command data {}", path.display()))
    }
}

impl CommandService for StaticCommandService {
    fn execute(&self, kind: CommandKind, word: &str) -> CommandOutcome {
        let key = normalize_key(word);
        if let Some(result) = self.entries.get(&(kind, key.clone())) {
            return CommandOutcome::Found(result.clone());
        }
        if kind == CommandKind::Plural && self.plural_forms.contains(&key) {
            return CommandOutcome::AlreadyPlural;
        }
        CommandOutcome::NotFound
    }
}

// ============================================================================
// Edit engine
// ============================================================================

/// Result of one edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditResult {
    /// A buffer was modified
    Handled,
    /// Valid key, nothing to change (e.g. delete in an empty command bar)
    Unchanged,
    /// A command word was submitted; the caller must return to `Idle`
    Submitted {
        kind: CommandKind,
        word: String,
        outcome: CommandOutcome,
    },
    /// Not applied at all; state untouched
    Ignored(IgnoreReason),
}

/// Applies edits to the document or to the command input.
#[derive(Clone)]
pub struct EditEngine {
    service: Arc<dyn CommandService>,
}

impl EditEngine {
    pub fn new(service: Arc<dyn CommandService>) -> Self {
        Self { service }
    }

    /// Delete one character (or the selection) from `target`.
    ///
    /// In the command bar an empty input makes this a no-op; it never falls
    /// through to the document.
    pub fn delete(
        &self,
        target: EditTarget,
        cursor: &mut dyn TextCursor,
        input: &mut CommandBuffer,
    ) -> EditResult {
        match target {
            EditTarget::Main => {
                if cursor.has_selection() {
                    cursor.delete_selection();
                } else {
                    cursor.delete_backward();
                }
                EditResult::Handled
            }
            EditTarget::CommandBar => {
                if input.delete_before() {
                    EditResult::Handled
                } else {
                    EditResult::Unchanged
                }
            }
        }
    }

    /// Enter: forward to the host, or submit the command word.
    ///
    /// `mode` names the command being submitted when `target` is the command
    /// bar. An empty (or whitespace-only) command input is left untouched.
    pub fn press_enter(
        &self,
        target: EditTarget,
        mode: Mode,
        cursor: &mut dyn TextCursor,
        input: &mut CommandBuffer,
    ) -> EditResult {
        if target == EditTarget::Main {
            cursor.send_enter();
            return EditResult::Handled;
        }

        let Some(kind) = mode.command_kind() else {
            return EditResult::Ignored(IgnoreReason::NoActiveCommand);
        };
        let word = input.text().trim().to_string();
        if word.is_empty() {
            return EditResult::Ignored(IgnoreReason::EmptyCommandInput);
        }

        let outcome = self.service.execute(kind, &word);
        debug!(%kind, word = %word, ?outcome, "command submitted");
        if let CommandOutcome::Found(text) = &outcome {
            cursor.insert_text(text);
            cursor.insert_text(" ");
        }
        input.clear();
        EditResult::Submitted {
            kind,
            word,
            outcome,
        }
    }

    /// Write already-cased `text` to the buffer selected by `mode`.
    pub fn insert(
        &self,
        text: &str,
        mode: Mode,
        cursor: &mut dyn TextCursor,
        input: &mut CommandBuffer,
    ) -> EditResult {
        if text.is_empty() {
            return EditResult::Unchanged;
        }
        match mode.edit_target() {
            EditTarget::Main => cursor.insert_text(text),
            EditTarget::CommandBar => input.push_str(text),
        }
        EditResult::Handled
    }

    /// Insert an emoji into the document, separated from a preceding word.
    pub fn insert_emoji(&self, emoji: &str, cursor: &mut dyn TextCursor) -> EditResult {
        let before = cursor.text_before_cursor(1);
        if before.chars().last().is_some_and(|c| !c.is_whitespace()) {
            cursor.insert_text(" ");
        }
        cursor.insert_text(emoji);
        EditResult::Handled
    }
}

impl std::fmt::Debug for EditEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditEngine").finish_non_exhaustive()
    }
}
