// languages/tests/builtin_languages.rs
//
// The shipped English and Italian keyboards driven through key scripts.

use scribe_languages::{
    create_keyboard_engine, create_keyboard_engine_english, create_keyboard_engine_italian,
    lexicon, parse_script, CommandKind, Config, KeyboardEngine, Language, MemoryCursor, Mode,
};

fn run(keyboard: &mut KeyboardEngine<MemoryCursor>, script: &str) {
    for action in parse_script(script).unwrap() {
        action.apply(keyboard);
    }
}

fn italian() -> KeyboardEngine<MemoryCursor> {
    let mut keyboard = create_keyboard_engine_italian().unwrap();
    keyboard.attach_cursor(MemoryCursor::new());
    keyboard
}

fn text(keyboard: &KeyboardEngine<MemoryCursor>) -> &str {
    keyboard.cursor().unwrap().text()
}

#[test]
fn test_italian_interface_strings() {
    let table = lexicon(Language::Italian).unwrap();
    assert_eq!(table.language(), "Italiano");
    assert_eq!(table.strings().space_bar, "spazio");
    assert_eq!(table.strings().currency_symbol, "€");
    assert_eq!(table.command(CommandKind::Translate).label, "Tradurre");
    assert_eq!(table.command(CommandKind::Conjugate).prompt, "Coniugare: ");
    assert_eq!(table.command(CommandKind::Plural).placeholder, "Inserisci un nome");
}

#[test]
fn test_italian_seed_suggestions() {
    let mut keyboard = italian();
    assert_eq!(keyboard.context().suggestions.words, ["ho", "non", "ma"]);
    run(&mut keyboard, "12");
    assert_eq!(keyboard.context().suggestions.words, ["utenti", "anni", "e"]);
}

#[test]
fn test_italian_plural_command() {
    let mut keyboard = italian();
    run(&mut keyboard, "<cmd><plural>");
    assert_eq!(
        keyboard.context().command_bar.display_text("│"),
        "Plurale: │ Inserisci un nome"
    );
    run(&mut keyboard, "gatto<enter>");
    assert_eq!(keyboard.mode(), Mode::Idle);
    assert_eq!(text(&keyboard), "gatti ");
}

#[test]
fn test_italian_already_plural() {
    let mut keyboard = italian();
    run(&mut keyboard, "<cmd><plural>gatti<enter>");
    assert_eq!(keyboard.context().status_message.as_deref(), Some("Già plurale"));
    assert_eq!(text(&keyboard), "");
}

#[test]
fn test_italian_unknown_word() {
    let mut keyboard = italian();
    run(&mut keyboard, "<cmd><translate>zzz<enter>");
    assert_eq!(keyboard.context().status_message.as_deref(), Some("Non in Wikidata"));
    assert_eq!(keyboard.mode(), Mode::Idle);
}

#[test]
fn test_italian_gender_and_emoji() {
    let mut keyboard = italian();
    run(&mut keyboard, "il gatto");
    // auto-capitalisation applies to the first letter of the buffer
    assert_eq!(text(&keyboard), "Il gatto");
    assert_eq!(keyboard.context().suggestions.grammatical_category.as_deref(), Some("M"));
    assert_eq!(keyboard.context().emoji_buttons, ["🐱", "🐈", "😺"]);

    run(&mut keyboard, " ");
    assert_eq!(keyboard.context().annotation.as_deref(), Some("M"));
    assert!(keyboard.context().emoji_buttons.is_empty());
}

#[test]
fn test_english_emoji_insertion() {
    let mut keyboard = create_keyboard_engine_english().unwrap();
    keyboard.attach_cursor(MemoryCursor::with_text("my dog"));
    run(&mut keyboard, "<emoji 0>");
    assert_eq!(text(&keyboard), "my dog 🐶");
}

#[test]
fn test_english_command_labels() {
    let mut keyboard = create_keyboard_engine_english().unwrap();
    keyboard.attach_cursor(MemoryCursor::new());
    run(&mut keyboard, "<cmd>");
    assert_eq!(
        keyboard.context().command_bar.prompt_text,
        "Translate · Conjugate · Plural"
    );
    run(&mut keyboard, "<cancel>");
    assert_eq!(keyboard.mode(), Mode::Idle);
}

#[test]
fn test_config_disables_emoji_and_capitals() {
    let config = Config {
        auto_capitalize: false,
        emoji_suggestions_enabled: false,
        ..Config::default()
    };
    let mut keyboard: KeyboardEngine<MemoryCursor> =
        create_keyboard_engine(Language::English, config).unwrap();
    keyboard.attach_cursor(MemoryCursor::new());
    run(&mut keyboard, "cat");
    assert_eq!(text(&keyboard), "cat");
    assert!(keyboard.context().emoji_buttons.is_empty());
    assert!(!keyboard.context().suggestions.emoji_matches.is_empty());
}

#[test]
fn test_english_irregular_plural() {
    let mut keyboard = create_keyboard_engine_english().unwrap();
    keyboard.attach_cursor(MemoryCursor::with_text("two "));
    run(&mut keyboard, "<cmd><plural>mouse<enter>");
    assert_eq!(text(&keyboard), "two mice ");
}
