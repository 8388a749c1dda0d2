//! Suggestion resolution for the trailing word.
//!
//! Given the word under the cursor and a [`LexiconTable`], produce the emoji
//! that match it and its grammatical category. When there is no word, the
//! table's seed words are offered instead so the user has something useful at
//! the start of a sentence.

use crate::lexicon::LexiconTable;

/// Suggestions for the current trailing word.
///
/// Recomputed after every edit; never carried over to another word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionResult {
    /// Word suggestions (seed words at a word start, numeric seeds after a number)
    pub words: Vec<String>,
    /// Emoji matching the word, in the table's declared order
    pub emoji_matches: Vec<String>,
    /// Grammatical category label of the word, if known
    pub grammatical_category: Option<String>,
}

impl SuggestionResult {
    /// Whether nothing at all is suggested.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.emoji_matches.is_empty() && self.grammatical_category.is_none()
    }
}

/// Resolve suggestions for `word` against `table`.
///
/// - empty word: the table's seed suggestions, no emoji, no category
/// - otherwise the emoji and category lookups run independently; a miss in
///   either is simply an empty result, never an error
/// - a numeric word additionally yields the table's numeric seeds
pub fn resolve(word: &str, table: &LexiconTable) -> SuggestionResult {
    if word.is_empty() {
        return SuggestionResult {
            words: table.seed_suggestions().to_vec(),
            emoji_matches: Vec::new(),
            grammatical_category: None,
        };
    }

    let words = if is_numeric(word) {
        table.numeric_suggestions().to_vec()
    } else {
        Vec::new()
    };

    SuggestionResult {
        words,
        emoji_matches: table.emoji_for(word).map(<[String]>::to_vec).unwrap_or_default(),
        grammatical_category: table.category_for(word).map(str::to_string),
    }
}

/// Decimal separators are word boundaries, so a number reaches the resolver
/// as its trailing digit run only.
fn is_numeric(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{CommandStrings, CommandTexts};

    fn table() -> LexiconTable {
        LexiconTable::builder("English", "en")
            .commands(CommandTexts {
                translate: CommandStrings::new("Translate", "Enter a word", "en -› "),
                conjugate: CommandStrings::new("Conjugate", "Enter a verb", "Conjugate: "),
                plural: CommandStrings::new("Plural", "Enter a noun", "Plural: "),
            })
            .seed_suggestions(["I", "I'm", "we"])
            .numeric_suggestions(["is", "to", "and"])
            .emoji("cat", ["🐱", "🐈", "😺"])
            .emoji("happy", ["😀"])
            .category("cat", "N")
            .category("house", "N")
            .try_build()
            .unwrap()
    }

    #[test]
    fn test_empty_word_returns_seeds() {
        let result = resolve("", &table());
        assert_eq!(result.words, ["I", "I'm", "we"]);
        assert!(result.emoji_matches.is_empty());
        assert_eq!(result.grammatical_category, None);
    }

    #[test]
    fn test_emoji_and_category() {
        let result = resolve("Cat", &table());
        assert_eq!(result.emoji_matches, ["🐱", "🐈", "😺"]);
        assert_eq!(result.grammatical_category.as_deref(), Some("N"));
        assert!(result.words.is_empty());
    }

    #[test]
    fn test_lookups_are_independent() {
        let t = table();
        let emoji_only = resolve("happy", &t);
        assert_eq!(emoji_only.emoji_matches, ["😀"]);
        assert_eq!(emoji_only.grammatical_category, None);

        let category_only = resolve("house", &t);
        assert!(category_only.emoji_matches.is_empty());
        assert_eq!(category_only.grammatical_category.as_deref(), Some("N"));
    }

    #[test]
    fn test_unknown_word_is_empty() {
        assert!(resolve("zebra", &table()).is_empty());
    }

    #[test]
    fn test_order_stable_across_calls() {
        let t = table();
        let first = resolve("cat", &t);
        for _ in 0..10 {
            assert_eq!(resolve("cat", &t), first);
        }
    }

    #[test]
    fn test_numeric_word_yields_numeric_seeds() {
        let result = resolve("42", &table());
        assert_eq!(result.words, ["is", "to", "and"]);
        assert!(resolve("4x4", &table()).words.is_empty());
    }

    #[test]
    fn test_decimal_number_resolves_from_last_digit_run() {
        let word = crate::word::extract_trailing_word("costs 3.50");
        assert_eq!(word, "50");
        assert_eq!(resolve(word, &table()).words, ["is", "to", "and"]);
        assert!(resolve("3.50", &table()).words.is_empty());
    }
}
