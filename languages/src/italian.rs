//! Italian keyboard data.

use std::sync::Arc;

use anyhow::Result;
use once_cell::sync::OnceCell;
use phf::phf_map;
use scribe_core::{CommandStrings, CommandTexts, InterfaceStrings, LexiconTable};

static EMOJI_KEYWORDS: phf::Map<&'static str, &'static str> = phf_map! {
    "gatto" => "🐱 🐈 😺",
    "cane" => "🐶 🐕",
    "felice" => "😀 😊",
    "triste" => "😢 😞",
    "amore" => "❤️ 😍 🥰",
    "cuore" => "❤️ 💚",
    "pizza" => "🍕",
    "caffè" => "☕",
    "sole" => "☀️ 🌞",
    "pioggia" => "🌧️ ☔",
    "casa" => "🏠 🏡",
    "libro" => "📖 📚",
    "musica" => "🎵 🎶",
    "festa" => "🥳 🎉",
};

/// Noun gender (`M` / `F`) or plural (`PL`) of known words.
static NOUN_CATEGORIES: phf::Map<&'static str, &'static str> = phf_map! {
    "gatto" => "M",
    "cane" => "M",
    "libro" => "M",
    "sole" => "M",
    "uomo" => "M",
    "casa" => "F",
    "pizza" => "F",
    "musica" => "F",
    "festa" => "F",
    "pioggia" => "F",
    "gatti" => "PL",
    "cani" => "PL",
    "case" => "PL",
    "libri" => "PL",
    "uomini" => "PL",
};

/// Demo command data for the terminal driver and tests.
pub const COMMAND_DATA: &str = r#"
[translate]
cat = "gatto"
dog = "cane"
house = "casa"
book = "libro"

[conjugate]
essere = "sono"
andare = "vado"
avere = "ho"

[plural]
gatto = "gatti"
cane = "cani"
casa = "case"
libro = "libri"
uomo = "uomini"
"#;

static TABLE: OnceCell<Arc<LexiconTable>> = OnceCell::new();

/// The Italian lexicon table, built on first use.
pub fn table() -> Result<Arc<LexiconTable>> {
    TABLE.get_or_try_init(|| build().map(Arc::new)).cloned()
}

fn build() -> Result<LexiconTable> {
    let mut builder = LexiconTable::builder("Italiano", "it")
        .strings(InterfaceStrings {
            space_bar: "spazio".to_string(),
            invalid_command: "Non in Wikidata".to_string(),
            already_plural: "Già plurale".to_string(),
            currency_symbol: "€".to_string(),
            currency_alternates: ["€", "$", "£", "¥", "₩", "¢"].map(String::from).to_vec(),
        })
        .commands(CommandTexts {
            translate: CommandStrings::new("Tradurre", "Inserisci una parola", "it -› "),
            conjugate: CommandStrings::new("Coniugare", "Inserisci un verbo", "Coniugare: "),
            plural: CommandStrings::new("Plurale", "Inserisci un nome", "Plurale: "),
        })
        .seed_suggestions(["ho", "non", "ma"])
        .numeric_suggestions(["utenti", "anni", "e"]);

    for (word, emojis) in EMOJI_KEYWORDS.entries() {
        builder = builder.emoji(word, emojis.split_whitespace());
    }
    for (word, category) in NOUN_CATEGORIES.entries() {
        builder = builder.category(word, *category);
    }
    builder.try_build()
}
