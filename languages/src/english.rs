//! English keyboard data.

use std::sync::Arc;

use anyhow::Result;
use once_cell::sync::OnceCell;
use phf::phf_map;
use scribe_core::{CommandStrings, CommandTexts, InterfaceStrings, LexiconTable};

/// Emoji offered for a keyword, space separated and in display order.
static EMOJI_KEYWORDS: phf::Map<&'static str, &'static str> = phf_map! {
    "cat" => "🐱 🐈 😺",
    "dog" => "🐶 🐕 🦮",
    "happy" => "😀 😊 🥳",
    "sad" => "😢 😞",
    "love" => "❤️ 😍 🥰",
    "heart" => "❤️ 💙 💚",
    "pizza" => "🍕",
    "coffee" => "☕",
    "sun" => "☀️ 🌞",
    "rain" => "🌧️ ☔",
    "house" => "🏠 🏡",
    "book" => "📖 📚",
    "music" => "🎵 🎶",
    "fire" => "🔥",
    "party" => "🥳 🎉",
    "ok" => "👌 🆗",
};

/// Grammatical annotation of known words. English nouns carry no gender, so
/// only plural forms are marked.
static NOUN_CATEGORIES: phf::Map<&'static str, &'static str> = phf_map! {
    "cats" => "PL",
    "dogs" => "PL",
    "children" => "PL",
    "mice" => "PL",
    "people" => "PL",
    "houses" => "PL",
    "books" => "PL",
};

/// Demo command data for the terminal driver and tests.
pub const COMMAND_DATA: &str = r#"
[translate]
hola = "hello"
gato = "cat"
casa = "house"
libro = "book"

[conjugate]
go = "goes"
be = "is"
have = "has"

[plural]
cat = "cats"
dog = "dogs"
child = "children"
mouse = "mice"
person = "people"
house = "houses"
book = "books"
"#;

static TABLE: OnceCell<Arc<LexiconTable>> = OnceCell::new();

/// The English lexicon table, built on first use.
pub fn table() -> Result<Arc<LexiconTable>> {
    TABLE.get_or_try_init(|| build().map(Arc::new)).cloned()
}

fn build() -> Result<LexiconTable> {
    let mut builder = LexiconTable::builder("English", "en")
        .strings(InterfaceStrings {
            space_bar: "space".to_string(),
            invalid_command: "Not in Wikidata".to_string(),
            already_plural: "Already plural".to_string(),
            currency_symbol: "$".to_string(),
            currency_alternates: ["$", "€", "£", "¥", "₩", "¢"].map(String::from).to_vec(),
        })
        .commands(CommandTexts {
            translate: CommandStrings::new("Translate", "Enter a word", "en -› "),
            conjugate: CommandStrings::new("Conjugate", "Enter a verb", "Conjugate: "),
            plural: CommandStrings::new("Plural", "Enter a noun", "Plural: "),
        })
        .seed_suggestions(["I", "I'm", "we"])
        .numeric_suggestions(["is", "to", "and"]);

    for (word, emojis) in EMOJI_KEYWORDS.entries() {
        builder = builder.emoji(word, emojis.split_whitespace());
    }
    for (word, category) in NOUN_CATEGORIES.entries() {
        builder = builder.category(word, *category);
    }
    builder.try_build()
}
