//! Keyboard engine: the event coordinator and command-mode state machine.
//!
//! The `KeyboardEngine` owns the session (mode + command input), the shift
//! tracker and the view model. `on_key()` runs one key event to completion:
//! mode check, edit, suggestion refresh, view-model emission. Mode only
//! changes through `select_command()`, `select_command_kind()`,
//! `cancel_command()` and a successful command submission.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::command_bar::CommandBarState;
use crate::context::KeyboardContext;
use crate::cursor::{TextCursor, CONTEXT_CHARS};
use crate::editor::{CommandOutcome, CommandService, EditEngine, EditResult};
use crate::lexicon::LexiconTable;
use crate::session::{CommandKind, EditTarget, KeyboardSession, Mode};
use crate::shift::{determine_active_layout, Clock, LayoutKind, ShiftTracker, SystemClock};
use crate::suggestion::{resolve, SuggestionResult};
use crate::word::{extract_trailing_word, is_sentence_start};
use crate::Config;

/// Key events delivered by the key-layout layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Backspace
    Delete,
    Shift,
    Enter,
    /// Switch between letters and symbols
    ModeChange,
    Space,
    /// Any printable character
    Char(char),
}

/// Why an event or action was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The host has no input connection
    NoActiveCursor,
    /// Enter pressed with nothing typed after the command prompt
    EmptyCommandInput,
    /// Command submission outside an `Awaiting*Input` mode
    NoActiveCommand,
    /// Emoji index outside the offered suggestions
    NoSuchSuggestion,
}

/// Result of processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// Event fully applied and the view model refreshed
    Handled,
    /// Event dropped; no state changed
    Ignored(IgnoreReason),
}

type Listener = Box<dyn FnMut(&KeyboardContext)>;

/// Keyboard engine with session management.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use scribe_core::{
///     CommandKind, CommandStrings, CommandTexts, Config, KeyEvent, KeyboardEngine,
///     LexiconTable, MemoryCursor, NullCommandService,
/// };
///
/// let table = LexiconTable::builder("English", "en")
///     .commands(CommandTexts {
///         translate: CommandStrings::new("Translate", "Enter a word", "en -› "),
///         conjugate: CommandStrings::new("Conjugate", "Enter a verb", "Conjugate: "),
///         plural: CommandStrings::new("Plural", "Enter a noun", "Plural: "),
///     })
///     .emoji("cat", ["🐱"])
///     .try_build()
///     .unwrap();
///
/// let mut keyboard = KeyboardEngine::new(Arc::new(table), Arc::new(NullCommandService), Config::default());
/// keyboard.attach_cursor(MemoryCursor::with_text("a "));
/// for ch in "cat".chars() {
///     keyboard.on_key(KeyEvent::Char(ch));
/// }
/// assert_eq!(keyboard.context().emoji_buttons, ["🐱"]);
/// ```
pub struct KeyboardEngine<C: TextCursor> {
    lexicon: Arc<LexiconTable>,

    config: Config,

    editor: EditEngine,

    session: KeyboardSession,

    shift: ShiftTracker,

    clock: Box<dyn Clock>,

    /// Layout currently on screen
    layout: LayoutKind,

    /// Sentence-start capitalisation, kept apart from the shift state
    auto_shift: bool,

    /// Host input connection, absent between sessions
    cursor: Option<C>,

    context: KeyboardContext,

    listener: Option<Listener>,
}

impl<C: TextCursor> KeyboardEngine<C> {
    /// Create an engine without a text cursor, in `Idle`.
    pub fn new(lexicon: Arc<LexiconTable>, service: Arc<dyn CommandService>, config: Config) -> Self {
        let shift = ShiftTracker::new(config.double_tap_window());
        let mut engine = Self {
            lexicon,
            config,
            editor: EditEngine::new(service),
            session: KeyboardSession::new(),
            shift,
            clock: Box::new(SystemClock),
            layout: LayoutKind::Letters,
            auto_shift: false,
            cursor: None,
            context: KeyboardContext::new(),
            listener: None,
        };
        engine.refresh(None, None);
        engine
    }

    /// Replace the time source used for double-tap detection.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Register the view-model listener, called after every processed event.
    pub fn set_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&KeyboardContext) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    /// Get a reference to the context for reading keyboard state.
    pub fn context(&self) -> &KeyboardContext {
        &self.context
    }

    pub fn mode(&self) -> Mode {
        self.session.mode()
    }

    pub fn session(&self) -> &KeyboardSession {
        &self.session
    }

    pub fn shift(&self) -> &ShiftTracker {
        &self.shift
    }

    pub fn layout(&self) -> LayoutKind {
        self.layout
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn lexicon(&self) -> &Arc<LexiconTable> {
        &self.lexicon
    }

    /// Swap the active language.
    pub fn set_lexicon(&mut self, lexicon: Arc<LexiconTable>) {
        debug!(language = lexicon.language(), "lexicon switched");
        self.lexicon = lexicon;
        self.refresh(None, None);
    }

    pub fn cursor(&self) -> Option<&C> {
        self.cursor.as_ref()
    }

    pub fn cursor_mut(&mut self) -> Option<&mut C> {
        self.cursor.as_mut()
    }

    /// The host opened an input connection.
    pub fn attach_cursor(&mut self, cursor: C) {
        self.cursor = Some(cursor);
        self.refresh(None, None);
    }

    /// The host closed its input connection.
    pub fn detach_cursor(&mut self) -> Option<C> {
        let cursor = self.cursor.take();
        self.refresh(None, None);
        cursor
    }

    /// Tear down the input session: back to `Idle`, shift and layout reset,
    /// cursor released.
    pub fn end_session(&mut self) -> Option<C> {
        debug!(mode = ?self.session.mode(), "session ended");
        self.session.clear();
        self.shift.reset();
        self.layout = LayoutKind::Letters;
        self.context.clear();
        self.detach_cursor()
    }

    // ========== Mode transitions ==========

    /// Open the command bar (`Idle` → `SelectingCommand`).
    pub fn select_command(&mut self) -> bool {
        let from = self.session.mode();
        let applied = self.session.select_command();
        self.after_transition(from, applied)
    }

    /// Choose a command (`SelectingCommand` → `Awaiting*Input`).
    pub fn select_command_kind(&mut self, kind: CommandKind) -> bool {
        let from = self.session.mode();
        let applied = self.session.select_command_kind(kind);
        self.after_transition(from, applied)
    }

    /// Abandon the command bar from any non-idle mode.
    pub fn cancel_command(&mut self) -> bool {
        let from = self.session.mode();
        let applied = self.session.cancel_command();
        self.after_transition(from, applied)
    }

    fn after_transition(&mut self, from: Mode, applied: bool) -> bool {
        if applied {
            debug!(?from, to = ?self.session.mode(), "mode transition");
            self.refresh(None, None);
        } else {
            trace!(mode = ?from, "transition not available");
        }
        applied
    }

    // ========== Key processing ==========

    /// Process one key event.
    ///
    /// Without a text cursor the event is dropped and nothing changes.
    pub fn on_key(&mut self, key: KeyEvent) -> KeyResult {
        let Some(mut cursor) = self.cursor.take() else {
            debug!(?key, "no active text cursor; key dropped");
            return KeyResult::Ignored(IgnoreReason::NoActiveCursor);
        };
        trace!(?key, mode = ?self.session.mode(), "key");
        let result = self.process_key(key, &mut cursor);
        self.cursor = Some(cursor);

        match result {
            Ok((status, annotation)) => {
                self.refresh(status, annotation);
                KeyResult::Handled
            }
            Err(reason) => {
                debug!(?key, ?reason, "key ignored");
                KeyResult::Ignored(reason)
            }
        }
    }

    /// Apply `key`; on success returns the status message and annotation
    /// for the refreshed view model.
    fn process_key(
        &mut self,
        key: KeyEvent,
        cursor: &mut C,
    ) -> Result<(Option<String>, Option<String>), IgnoreReason> {
        if key != KeyEvent::Shift {
            self.shift.on_other_key();
        }

        let mode = self.session.mode();
        let target = mode.edit_target();
        let completed_category = if key == KeyEvent::Space && target == EditTarget::Main {
            self.completed_word_category(cursor)
        } else {
            None
        };

        let edit = match key {
            KeyEvent::Delete => {
                self.editor
                    .delete(target, cursor, self.session.command_input_mut())
            }
            KeyEvent::Shift => {
                self.handle_shift();
                EditResult::Handled
            }
            KeyEvent::Enter => {
                self.editor
                    .press_enter(target, mode, cursor, self.session.command_input_mut())
            }
            KeyEvent::ModeChange => {
                self.layout = self.layout.after_mode_change();
                EditResult::Handled
            }
            KeyEvent::Space => {
                self.editor
                    .insert(" ", mode, cursor, self.session.command_input_mut())
            }
            KeyEvent::Char(ch) => {
                let text = self.apply_case(ch, target);
                self.editor
                    .insert(&text, mode, cursor, self.session.command_input_mut())
            }
        };

        let status = match edit {
            EditResult::Ignored(reason) => return Err(reason),
            EditResult::Submitted { kind, outcome, .. } => {
                self.session.complete_command();
                debug!(%kind, to = ?self.session.mode(), "command completed");
                self.outcome_message(&outcome)
            }
            EditResult::Handled | EditResult::Unchanged => None,
        };

        Ok((status, completed_category))
    }

    /// Category of the word a space at the cursor would complete, read from
    /// the host buffer as it is now. A selection is replaced by the space, so
    /// no word is completed.
    fn completed_word_category(&self, cursor: &C) -> Option<String> {
        if cursor.has_selection() {
            return None;
        }
        let before = cursor.text_before_cursor(CONTEXT_CHARS);
        let word = extract_trailing_word(&before);
        if word.is_empty() {
            return None;
        }
        self.lexicon.category_for(word).map(str::to_string)
    }

    fn handle_shift(&mut self) {
        match self.layout {
            LayoutKind::Letters => {
                let action = self.shift.on_shift_pressed(self.clock.now());
                trace!(?action, "shift");
            }
            LayoutKind::Symbols | LayoutKind::SymbolsShifted => {
                self.layout = determine_active_layout(self.layout, self.layout == LayoutKind::Symbols);
            }
        }
    }

    /// Case a typed character according to shift and sentence position.
    fn apply_case(&mut self, ch: char, target: EditTarget) -> String {
        if self.layout != LayoutKind::Letters || !ch.is_alphabetic() {
            return ch.to_string();
        }
        let auto = target == EditTarget::Main && std::mem::take(&mut self.auto_shift);
        let manual = self.shift.take_capitalization();
        if auto || manual {
            ch.to_uppercase().collect()
        } else {
            ch.to_string()
        }
    }

    fn outcome_message(&self, outcome: &CommandOutcome) -> Option<String> {
        let strings = self.lexicon.strings();
        let message = match outcome {
            CommandOutcome::Found(_) => return None,
            CommandOutcome::NotFound => &strings.invalid_command,
            CommandOutcome::AlreadyPlural => &strings.already_plural,
        };
        (!message.is_empty()).then(|| message.clone())
    }

    // ========== Emoji suggestions ==========

    /// Insert the `index`-th offered emoji into the document.
    ///
    /// The offered emoji are resolved from the current text before the cursor.
    pub fn insert_emoji(&mut self, index: usize) -> KeyResult {
        let Some(before) = self.cursor.as_ref().map(|c| c.text_before_cursor(CONTEXT_CHARS)) else {
            debug!("no active text cursor; emoji dropped");
            return KeyResult::Ignored(IgnoreReason::NoActiveCursor);
        };
        let suggestions = resolve(extract_trailing_word(&before), &self.lexicon);
        let Some(emoji) = self.offered_emoji(&suggestions).into_iter().nth(index) else {
            return KeyResult::Ignored(IgnoreReason::NoSuchSuggestion);
        };
        let Some(cursor) = self.cursor.as_mut() else {
            return KeyResult::Ignored(IgnoreReason::NoActiveCursor);
        };
        self.shift.on_other_key();
        self.editor.insert_emoji(&emoji, cursor);
        self.refresh(None, None);
        KeyResult::Handled
    }

    /// Emoji shown as buttons for `suggestions`: truncated, none when disabled.
    fn offered_emoji(&self, suggestions: &SuggestionResult) -> Vec<String> {
        if !self.config.emoji_suggestions_enabled {
            return Vec::new();
        }
        suggestions
            .emoji_matches
            .iter()
            .take(self.config.max_emoji_suggestions)
            .cloned()
            .collect()
    }

    // ========== View model ==========

    /// Recompute suggestions and the view model, then notify the listener.
    fn refresh(&mut self, status_message: Option<String>, annotation: Option<String>) {
        let mode = self.session.mode();
        let before = self.cursor.as_ref().map(|c| c.text_before_cursor(CONTEXT_CHARS));
        let word = before.as_deref().map(extract_trailing_word).unwrap_or("");
        let suggestions = resolve(word, &self.lexicon);

        self.auto_shift = self.config.auto_capitalize
            && mode.edit_target() == EditTarget::Main
            && self.layout == LayoutKind::Letters
            && before.as_deref().is_some_and(is_sentence_start);

        let emoji_buttons = self.offered_emoji(&suggestions);

        self.context = KeyboardContext {
            suggestions,
            emoji_buttons,
            command_bar: CommandBarState::derive(
                mode,
                self.session.command_input(),
                &self.lexicon,
                &self.config.command_label_separator,
            ),
            active_layout: self.layout,
            is_shift_locked: self.shift.is_caps_locked(),
            is_shifted: self.shift.is_shifted() || self.auto_shift,
            enter_highlighted: !mode.is_idle(),
            status_message,
            annotation,
        };

        if let Some(listener) = self.listener.as_mut() {
            listener(&self.context);
        }
    }
}
