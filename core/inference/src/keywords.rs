use regex::Regex;
use std::collections::{BTreeSet, HashSet};

use crate::config::Vocabulary;

/// Normalized terms extracted from one note: single words and short phrases.
pub type KeywordSet = BTreeSet<String>;

/// Heuristic keyword extractor.
///
/// Lowercases the text, strips punctuation, drops stopwords and short tokens,
/// then keeps domain terms, longer words, and 2/3-word phrases containing a
/// marker substring. Total over any input string.
pub struct KeywordExtractor {
    punctuation: Regex,
    stopwords: HashSet<String>,
    domain_terms: HashSet<String>,
    phrase_markers: Vec<String>,
    min_token_len: usize,
    min_word_len: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(&Vocabulary::default())
    }
}

impl KeywordExtractor {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        Self {
            // ASCII word characters only, anything else is punctuation
            punctuation: Regex::new(r"[^A-Za-z0-9_\s]").expect("punctuation pattern is valid"),
            stopwords: vocabulary.stopwords.iter().map(|w| w.to_lowercase()).collect(),
            domain_terms: vocabulary
                .domain_terms
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
            phrase_markers: vocabulary
                .phrase_markers
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
            min_token_len: vocabulary.min_token_len,
            min_word_len: vocabulary.min_word_len,
        }
    }

    pub fn extract(&self, text: &str) -> KeywordSet {
        let normalized = self.normalize(text);
        let words = self.tokenize(&normalized);
        let mut keywords = KeywordSet::new();

        for word in &words {
            if self.domain_terms.contains(*word) || word.len() >= self.min_word_len {
                keywords.insert(word.to_string());
            }
        }

        // Phrases are built from the stopword-filtered sequence, so a phrase may
        // contain a word that was too short to be a keyword by itself
        for i in 0..words.len().saturating_sub(1) {
            let phrase = format!("{} {}", words[i], words[i + 1]);
            if self.has_marker(&phrase) {
                keywords.insert(phrase.clone());
            }

            if let Some(next) = words.get(i + 2) {
                let tri_phrase = format!("{} {}", phrase, next);
                if self.has_marker(&tri_phrase) {
                    keywords.insert(tri_phrase);
                }
            }
        }

        keywords
    }

    /// Stopwords and short tokens removed, order preserved.
    fn tokenize<'a>(&self, normalized: &'a str) -> Vec<&'a str> {
        normalized
            .split_whitespace()
            .filter(|word| word.len() >= self.min_token_len && !self.stopwords.contains(*word))
            .collect()
    }

    fn has_marker(&self, phrase: &str) -> bool {
        self.phrase_markers
            .iter()
            .any(|marker| phrase.contains(marker.as_str()))
    }

    fn normalize(&self, text: &str) -> String {
        self.punctuation
            .replace_all(&text.to_lowercase(), "")
            .into_owned()
    }
}
