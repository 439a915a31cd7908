//! Word-frequency analysis over document text.
//!
//! Tokens are whitespace-separated, lowercased, and stripped of surrounding
//! punctuation. A token qualifies only if what remains is purely alphabetic and
//! not a Portuguese stop-word.

use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Default length of the ranked listing
pub const DEFAULT_TOP_N: usize = 20;

lazy_static! {
    static ref STOP_WORDS: HashSet<String> = stop_words::get(stop_words::LANGUAGE::Portuguese)
        .iter()
        .map(|word| word.to_lowercase())
        .collect();
}

/// One row of the frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

impl fmt::Display for WordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.word, self.count)
    }
}

/// Lowercase, trim punctuation, and filter a single raw token
fn qualify(raw: &str) -> Option<String> {
    let lowered = raw.to_lowercase();
    let word = lowered.trim_matches(|c: char| !c.is_alphanumeric());

    if word.is_empty() || !word.chars().all(char::is_alphabetic) || STOP_WORDS.contains(word) {
        return None;
    }
    Some(word.to_string())
}

/// Qualifying words of `text`, in order of appearance
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().filter_map(qualify).collect()
}

/// Count qualifying words, most frequent first.
///
/// Words with equal counts keep the order in which they first appeared.
pub fn word_frequencies(text: &str) -> Vec<WordCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<WordCount> = Vec::new();

    for word in tokenize(text) {
        match index.get(&word) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push(WordCount::new(word, 1));
            }
        }
    }

    // stable, so ties stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The `n` most frequent qualifying words
pub fn top_words(text: &str, n: usize) -> Vec<WordCount> {
    let mut counts = word_frequencies(text);
    counts.truncate(n);
    counts
}

/// Render a listing as `word: count` lines
pub fn format_top_words(words: &[WordCount]) -> String {
    words
        .iter()
        .map(WordCount::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gato_scenario() {
        let counts = word_frequencies("O gato correu. O gato comeu.");
        assert_eq!(
            counts,
            vec![
                WordCount::new("gato", 2),
                WordCount::new("correu", 1),
                WordCount::new("comeu", 1),
            ]
        );
    }

    #[test]
    fn test_tokenize_filters() {
        let tokens = tokenize("Rust 2024 é-bom, (Linguagem) de compiladores e_b x2 \"Ferrugem\"!");
        assert_eq!(tokens, vec!["rust", "linguagem", "compiladores", "ferrugem"]);
    }

    #[test]
    fn test_counting_is_case_insensitive() {
        let counts = word_frequencies("Brasil brasil BRASIL");
        assert_eq!(counts, vec![WordCount::new("brasil", 3)]);
    }

    #[test]
    fn test_accented_words_are_alphabetic() {
        let counts = word_frequencies("ação coração ação");
        assert_eq!(
            counts,
            vec![WordCount::new("ação", 2), WordCount::new("coração", 1)]
        );
    }

    #[test]
    fn test_stop_words_are_dropped() {
        assert_eq!(tokenize("de Que gato"), vec!["gato"]);
    }

    #[test]
    fn test_top_words_truncates() {
        let text: String = (0..30)
            .map(|i| format!("palavra{} ", i))
            .chain((0..5).map(|_| "repetida ".to_string()))
            .collect();
        // "palavraN" contains digits, so only "repetida" qualifies
        assert_eq!(top_words(&text, 20), vec![WordCount::new("repetida", 5)]);

        let letters = "abcdefghijklmnopqrstuvwxyz";
        let text: String = (0..26)
            .map(|i| format!("zz{} ", &letters[i..i + 1].repeat(3)))
            .collect();
        let top = top_words(&text, DEFAULT_TOP_N);
        assert_eq!(top.len(), 20);
        assert!(top.iter().all(|w| w.count == 1));
    }

    #[test]
    fn test_format_top_words() {
        let words = vec![WordCount::new("gato", 2), WordCount::new("comeu", 1)];
        assert_eq!(format_top_words(&words), "gato: 2\ncomeu: 1");
        assert_eq!(format_top_words(&[]), "");
    }

    #[test]
    fn test_empty_text() {
        assert!(word_frequencies("").is_empty());
        assert!(top_words("   \n", 20).is_empty());
    }
}
