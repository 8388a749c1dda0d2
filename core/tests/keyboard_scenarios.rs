// core/tests/keyboard_scenarios.rs
//
// End-to-end scenarios for the keyboard engine.
//
// Tests cover:
// - Space after a word resets suggestions to the seed list
// - Command submission invokes the command service and returns to Idle
// - Delete in an empty command bar is a no-op
// - Mode transition closure through the public calls
// - Double-tap shift with an injected clock
// - Dropped keys while the host has no input connection

use scribe_core::{
    CommandKind, CommandOutcome, CommandService, CommandStrings, CommandTexts, Config, IgnoreReason,
    KeyEvent, KeyResult, KeyboardEngine, LexiconTable, ManualClock, MemoryCursor, Mode,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Command service that records every call.
#[derive(Default)]
struct RecordingService {
    calls: Mutex<Vec<(CommandKind, String)>>,
}

impl RecordingService {
    fn calls(&self) -> Vec<(CommandKind, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandService for RecordingService {
    fn execute(&self, kind: CommandKind, word: &str) -> CommandOutcome {
        self.calls.lock().unwrap().push((kind, word.to_string()));
        match (kind, word) {
            (CommandKind::Plural, "cat") => CommandOutcome::Found("cats".to_string()),
            _ => CommandOutcome::NotFound,
        }
    }
}

fn english() -> Arc<LexiconTable> {
    Arc::new(
        LexiconTable::builder("English", "en")
            .commands(CommandTexts {
                translate: CommandStrings::new("Translate", "Enter a word", "en -› "),
                conjugate: CommandStrings::new("Conjugate", "Enter a verb", "Conjugate: "),
                plural: CommandStrings::new("Plural", "Enter a noun", "Plural: "),
            })
            .seed_suggestions(["I", "I'm", "we"])
            .emoji("cat", ["🐱", "🐈"])
            .category("cat", "N")
            .try_build()
            .unwrap(),
    )
}

fn setup(text: &str) -> (KeyboardEngine<MemoryCursor>, Arc<RecordingService>) {
    let service = Arc::new(RecordingService::default());
    let config = Config {
        auto_capitalize: false,
        ..Config::default()
    };
    let mut keyboard = KeyboardEngine::new(english(), service.clone(), config);
    keyboard.attach_cursor(MemoryCursor::with_text(text));
    (keyboard, service)
}

fn type_str(keyboard: &mut KeyboardEngine<MemoryCursor>, s: &str) {
    for ch in s.chars() {
        let key = if ch == ' ' { KeyEvent::Space } else { KeyEvent::Char(ch) };
        assert_eq!(keyboard.on_key(key), KeyResult::Handled);
    }
}

#[test]
fn test_space_after_word_resets_to_seeds() {
    let (mut keyboard, _) = setup("I have cat");
    assert_eq!(keyboard.context().suggestions.emoji_matches, ["🐱", "🐈"]);

    keyboard.on_key(KeyEvent::Space);

    assert_eq!(keyboard.cursor().unwrap().text(), "I have cat ");
    assert_eq!(keyboard.context().suggestions.words, ["I", "I'm", "we"]);
    assert!(keyboard.context().suggestions.emoji_matches.is_empty());
    assert_eq!(keyboard.context().suggestions.grammatical_category, None);
    assert_eq!(keyboard.mode(), Mode::Idle);
}

#[test]
fn test_plural_submission() {
    let (mut keyboard, service) = setup("");
    assert!(keyboard.select_command());
    assert!(keyboard.select_command_kind(CommandKind::Plural));
    type_str(&mut keyboard, "cat");
    assert_eq!(keyboard.session().command_input().text(), "cat");

    assert_eq!(keyboard.on_key(KeyEvent::Enter), KeyResult::Handled);

    assert_eq!(service.calls(), [(CommandKind::Plural, "cat".to_string())]);
    assert_eq!(keyboard.mode(), Mode::Idle);
    assert!(keyboard.session().command_input().is_empty());
    assert_eq!(keyboard.cursor().unwrap().text(), "cats ");
}

#[test]
fn test_delete_in_empty_command_bar_is_noop() {
    let (mut keyboard, _) = setup("untouched");
    keyboard.select_command();
    keyboard.select_command_kind(CommandKind::Translate);
    let mode = keyboard.mode();

    assert_eq!(keyboard.on_key(KeyEvent::Delete), KeyResult::Handled);

    assert_eq!(keyboard.mode(), mode);
    assert!(keyboard.session().command_input().is_empty());
    assert_eq!(keyboard.cursor().unwrap().text(), "untouched");
}

#[test]
fn test_command_bar_text_follows_typing() {
    let (mut keyboard, _) = setup("");
    keyboard.select_command();
    assert_eq!(
        keyboard.context().command_bar.prompt_text,
        "Translate · Conjugate · Plural"
    );
    keyboard.select_command_kind(CommandKind::Conjugate);
    let marker = keyboard.config().cursor_marker.clone();
    assert_eq!(
        keyboard.context().command_bar.display_text(&marker),
        "Conjugate: │ Enter a verb"
    );
    type_str(&mut keyboard, "go");
    assert_eq!(keyboard.context().command_bar.display_text(&marker), "Conjugate: go│");
    keyboard.on_key(KeyEvent::Delete);
    keyboard.on_key(KeyEvent::Delete);
    assert_eq!(
        keyboard.context().command_bar.display_text(&marker),
        "Conjugate: │ Enter a verb"
    );
}

#[test]
fn test_transition_closure() {
    for kind in CommandKind::ALL {
        let (mut keyboard, _) = setup("");
        assert!(!keyboard.select_command_kind(kind));
        assert_eq!(keyboard.mode(), Mode::Idle);

        assert!(keyboard.select_command());
        assert!(!keyboard.select_command());
        assert!(keyboard.select_command_kind(kind));
        assert_eq!(keyboard.mode(), Mode::awaiting(kind));

        type_str(&mut keyboard, "cat");
        keyboard.on_key(KeyEvent::Enter);
        assert_eq!(keyboard.mode(), Mode::Idle);
    }
}

#[test]
fn test_cancel_discards_command_input() {
    let (mut keyboard, service) = setup("doc");
    keyboard.select_command();
    keyboard.select_command_kind(CommandKind::Translate);
    type_str(&mut keyboard, "hello");
    assert!(keyboard.cancel_command());
    assert_eq!(keyboard.mode(), Mode::Idle);
    assert!(service.calls().is_empty());
    assert_eq!(keyboard.cursor().unwrap().text(), "doc");
    assert!(!keyboard.cancel_command());
}

#[test]
fn test_empty_command_enter_keeps_mode() {
    let (mut keyboard, service) = setup("");
    keyboard.select_command();
    keyboard.select_command_kind(CommandKind::Plural);
    assert_eq!(
        keyboard.on_key(KeyEvent::Enter),
        KeyResult::Ignored(IgnoreReason::EmptyCommandInput)
    );
    assert_eq!(keyboard.mode(), Mode::AwaitingPluralInput);
    assert!(service.calls().is_empty());
}

#[test]
fn test_double_tap_shift() {
    let clock = ManualClock::new();
    let (keyboard, _) = setup("");
    let mut keyboard = keyboard.with_clock(clock.clone());

    keyboard.on_key(KeyEvent::Shift);
    clock.advance(Duration::from_millis(100));
    keyboard.on_key(KeyEvent::Shift);
    assert!(keyboard.context().is_shift_locked);

    type_str(&mut keyboard, "abc");
    assert_eq!(keyboard.cursor().unwrap().text(), "ABC");
}

#[test]
fn test_slow_shift_taps_do_not_lock() {
    let clock = ManualClock::new();
    let (keyboard, _) = setup("");
    let mut keyboard = keyboard.with_clock(clock.clone());

    keyboard.on_key(KeyEvent::Shift);
    clock.advance(Duration::from_millis(500));
    keyboard.on_key(KeyEvent::Shift);
    assert!(!keyboard.context().is_shift_locked);

    type_str(&mut keyboard, "ab");
    assert_eq!(keyboard.cursor().unwrap().text(), "Ab");
}

#[test]
fn test_intervening_key_breaks_double_tap() {
    let clock = ManualClock::new();
    let (keyboard, _) = setup("");
    let mut keyboard = keyboard.with_clock(clock.clone());

    keyboard.on_key(KeyEvent::Shift);
    keyboard.on_key(KeyEvent::Char('a'));
    clock.advance(Duration::from_millis(50));
    keyboard.on_key(KeyEvent::Shift);
    assert!(!keyboard.context().is_shift_locked);
}

#[test]
fn test_keys_dropped_without_host_connection() {
    let (mut keyboard, _) = setup("abc");
    keyboard.select_command();
    keyboard.select_command_kind(CommandKind::Plural);
    let detached = keyboard.detach_cursor().unwrap();
    let view = keyboard.context().clone();

    for key in [KeyEvent::Char('x'), KeyEvent::Enter, KeyEvent::Delete, KeyEvent::Shift] {
        assert_eq!(keyboard.on_key(key), KeyResult::Ignored(IgnoreReason::NoActiveCursor));
    }
    assert_eq!(keyboard.mode(), Mode::AwaitingPluralInput);
    assert_eq!(keyboard.context(), &view);

    keyboard.attach_cursor(detached);
    assert_eq!(keyboard.cursor().unwrap().text(), "abc");
}

#[test]
fn test_selection_is_deleted_as_a_whole() {
    let (mut keyboard, _) = setup("a big cat");
    keyboard.cursor_mut().unwrap().select(2..6);
    keyboard.on_key(KeyEvent::Delete);
    assert_eq!(keyboard.cursor().unwrap().text(), "a cat");
    assert_eq!(keyboard.cursor().unwrap().cursor(), 2);
    assert_eq!(keyboard.context().suggestions.words, ["I", "I'm", "we"]);
}
