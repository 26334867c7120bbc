use std::collections::{BTreeSet, HashMap};

use crate::keywords::KeywordSet;

/// Inverted index from keyword to the positions of the notes containing it.
///
/// Two notes with no shared term always score zero, so candidates drawn from
/// this index are the only pairs that can clear a positive threshold.
#[derive(Debug, Default)]
pub struct TermIndex {
    postings: HashMap<String, Vec<usize>>,
}

impl TermIndex {
    pub fn build(keyword_sets: &[KeywordSet]) -> Self {
        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, keywords) in keyword_sets.iter().enumerate() {
            for term in keywords {
                postings.entry(term.clone()).or_default().push(position);
            }
        }
        Self { postings }
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn postings(&self, term: &str) -> &[usize] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Positions of every other note sharing a term with `keywords`, ascending.
    pub fn neighbors(&self, position: usize, keywords: &KeywordSet) -> BTreeSet<usize> {
        keywords
            .iter()
            .flat_map(|term| self.postings(term).iter().copied())
            .filter(|&other| other != position)
            .collect()
    }
}
