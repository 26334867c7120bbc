use mindmap_schemas::{Note, NoteId};
use std::collections::HashMap;
use tracing::{debug, error};

use crate::keywords::KeywordSet;
use crate::similarity::SimilarityScorer;

/// Picks at most one parent per note: the earlier note with the highest
/// similarity, provided it beats the threshold.
///
/// The hierarchy is a recency/overlap heuristic, not a taxonomy.
#[derive(Debug, Clone)]
pub struct HierarchyBuilder {
    scorer: SimilarityScorer,
    threshold: f64,
}

impl HierarchyBuilder {
    pub fn new(scorer: SimilarityScorer, threshold: f64) -> Self {
        Self { scorer, threshold }
    }

    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Search the whole collection for `note`'s parent.
    pub fn find_parent(
        &self,
        note: &Note,
        notes: &[Note],
        keywords: &HashMap<NoteId, KeywordSet>,
    ) -> Option<NoteId> {
        self.find_parent_among(note, notes.iter(), keywords)
    }

    /// Search only `candidates`, which must be in collection order so that the
    /// first of several equal best scores wins.
    pub fn find_parent_among<'n>(
        &self,
        note: &Note,
        candidates: impl IntoIterator<Item = &'n Note>,
        keywords: &HashMap<NoteId, KeywordSet>,
    ) -> Option<NoteId> {
        let current = lookup(keywords, &note.id)?;

        let mut best: Option<&NoteId> = None;
        let mut highest = self.threshold;

        for candidate in candidates {
            if candidate.id == note.id || candidate.timestamp >= note.timestamp {
                continue;
            }
            let Some(candidate_keywords) = lookup(keywords, &candidate.id) else {
                continue;
            };

            let similarity = self.scorer.score(current, candidate_keywords);
            if similarity > highest {
                highest = similarity;
                best = Some(&candidate.id);
            }
        }

        if let Some(parent) = best {
            debug!(
                "Note {} attached to parent {} (similarity {:.3})",
                note.id, parent, highest
            );
        }

        best.cloned()
    }
}

fn lookup<'k>(keywords: &'k HashMap<NoteId, KeywordSet>, id: &NoteId) -> Option<&'k KeywordSet> {
    let found = keywords.get(id);
    debug_assert!(found.is_some(), "keyword set missing for note {}", id);
    if found.is_none() {
        error!("No keyword set computed for note {}", id);
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::KeywordExtractor;

    fn notes_with_keywords(contents: &[&str]) -> (Vec<Note>, HashMap<NoteId, KeywordSet>) {
        let extractor = KeywordExtractor::default();
        let notes: Vec<Note> = contents
            .iter()
            .enumerate()
            .map(|(i, content)| Note::new(format!("n{}", i + 1).as_str(), *content, i as i64 * 10))
            .collect();
        let keywords = notes
            .iter()
            .map(|note| (note.id.clone(), extractor.extract(&note.content)))
            .collect();
        (notes, keywords)
    }

    fn builder() -> HierarchyBuilder {
        HierarchyBuilder::new(SimilarityScorer::default(), 0.1)
    }

    #[test]
    fn test_first_note_has_no_parent() {
        let (notes, keywords) = notes_with_keywords(&["The cell is the basic unit of life."]);
        assert_eq!(builder().find_parent(&notes[0], &notes, &keywords), None);
    }

    #[test]
    fn test_picks_highest_scoring_earlier_note() {
        let (notes, keywords) = notes_with_keywords(&[
            "The cell is the basic unit of life.",
            "The cell membrane controls what enters and exits the cell.",
            "Mitochondria are the powerhouse of the cell.",
        ]);

        let builder = builder();
        assert_eq!(
            builder.find_parent(&notes[1], &notes, &keywords),
            Some(NoteId::from("n1"))
        );
        // 3/10 against n1 beats 3/13 against n2
        assert_eq!(
            builder.find_parent(&notes[2], &notes, &keywords),
            Some(NoteId::from("n1"))
        );
    }

    #[test]
    fn test_later_notes_are_never_parents() {
        let (notes, keywords) = notes_with_keywords(&[
            "Protein folding basics",
            "The cell is the basic unit of life.",
            "The cell is the basic unit of life.",
        ]);

        // Identical content, but only the earlier copy qualifies
        assert_eq!(builder().find_parent(&notes[1], &notes, &keywords), None);
        assert_eq!(
            builder().find_parent(&notes[2], &notes, &keywords),
            Some(NoteId::from("n2"))
        );
    }

    #[test]
    fn test_equal_timestamps_do_not_qualify() {
        let extractor = KeywordExtractor::default();
        let notes = vec![
            Note::new("a", "cell biology notes", 5),
            Note::new("b", "cell biology notes", 5),
        ];
        let keywords: HashMap<NoteId, KeywordSet> = notes
            .iter()
            .map(|n| (n.id.clone(), extractor.extract(&n.content)))
            .collect();

        assert_eq!(builder().find_parent(&notes[1], &notes, &keywords), None);
    }

    #[test]
    fn test_ties_resolve_to_first_candidate() {
        let (notes, keywords) = notes_with_keywords(&[
            "energy storage",
            "energy storage",
            "energy storage",
        ]);

        assert_eq!(
            builder().find_parent(&notes[2], &notes, &keywords),
            Some(NoteId::from("n1"))
        );
    }

    #[test]
    fn test_threshold_is_strict() {
        let (notes, keywords) = notes_with_keywords(&["alpha beta", "alpha gamma"]);
        // One shared word: 1 / max(5, 3) = 0.2
        let at_score = HierarchyBuilder::new(SimilarityScorer::default(), 0.2);
        assert_eq!(at_score.find_parent(&notes[1], &notes, &keywords), None);

        let below_score = HierarchyBuilder::new(SimilarityScorer::default(), 0.19);
        assert_eq!(
            below_score.find_parent(&notes[1], &notes, &keywords),
            Some(NoteId::from("n1"))
        );
    }
}
