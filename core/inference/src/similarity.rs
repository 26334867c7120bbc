//! Weighted lexical overlap between two keyword sets.

use crate::config::ScoringWeights;
use crate::keywords::KeywordSet;

/// Scores keyword overlap. Shared anchor-term and child-marker terms weigh
/// more than plain words, and the sum is normalized by the union size with a
/// floor so small notes do not score near zero.
#[derive(Debug, Clone, Default)]
pub struct SimilarityScorer {
    weights: ScoringWeights,
}

impl SimilarityScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn score(&self, a: &KeywordSet, b: &KeywordSet) -> f64 {
        let anchor = self.weights.anchor_term.as_str();
        // The bonus condition reads both sides, so it is the same for every term
        let anchor_present = a.contains(anchor) || b.contains(anchor);

        let mut weight = 0.0;
        let mut shared = 0usize;
        for term in a.intersection(b) {
            shared += 1;
            weight += self.term_weight(term);

            if anchor_present && self.has_child_marker(term) {
                weight += self.weights.anchor_bonus;
            }
        }

        let union = a.len() + b.len() - shared;
        weight / union.max(self.weights.min_normalizer) as f64
    }

    fn term_weight(&self, term: &str) -> f64 {
        if term.contains(self.weights.anchor_term.as_str()) {
            self.weights.anchor_weight
        } else if self.has_child_marker(term) {
            self.weights.child_marker_weight
        } else if term.contains(' ') {
            self.weights.phrase_weight
        } else {
            self.weights.word_weight
        }
    }

    fn has_child_marker(&self, term: &str) -> bool {
        self.weights
            .child_markers
            .iter()
            .any(|marker| term.contains(marker.as_str()))
    }
}
