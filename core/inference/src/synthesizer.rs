use mindmap_schemas::{Link, MindMap, Node, Note, NoteId};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use crate::config::{InferenceConfig, Palette, SimilarityMode};
use crate::hierarchy::HierarchyBuilder;
use crate::keywords::{KeywordExtractor, KeywordSet};
use crate::similarity::SimilarityScorer;
use crate::term_index::TermIndex;

/// Turns an ordered note collection into a renderable mind map.
///
/// Runs in three passes:
/// 1. extract a keyword set per note
/// 2. assign parents in insertion order, emitting one node per note and one
///    hierarchical link per parent
/// 3. add similarity links for every remaining pair at or above the threshold
///
/// Pure: the same notes always produce the same map. Exact mode is quadratic
/// in the number of notes.
pub struct GraphSynthesizer {
    extractor: KeywordExtractor,
    hierarchy: HierarchyBuilder,
    palette: Palette,
    threshold: f64,
    label_max_chars: usize,
    label_ellipsis: String,
    mode: SimilarityMode,
}

impl Default for GraphSynthesizer {
    fn default() -> Self {
        Self::new(&InferenceConfig::default())
    }
}

impl GraphSynthesizer {
    pub fn new(config: &InferenceConfig) -> Self {
        let scorer = SimilarityScorer::new(config.scoring.clone());
        Self {
            extractor: KeywordExtractor::new(&config.vocabulary),
            hierarchy: HierarchyBuilder::new(scorer, config.similarity_threshold),
            palette: config.palette.clone(),
            threshold: config.similarity_threshold,
            label_max_chars: config.label_max_chars,
            label_ellipsis: config.label_ellipsis.clone(),
            mode: config.mode,
        }
    }

    pub fn mode(&self) -> SimilarityMode {
        self.mode
    }

    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }

    pub fn scorer(&self) -> &SimilarityScorer {
        self.hierarchy.scorer()
    }

    pub fn generate(&self, notes: &[Note]) -> MindMap {
        let keywords: HashMap<NoteId, KeywordSet> = notes
            .iter()
            .map(|note| (note.id.clone(), self.extractor.extract(&note.content)))
            .collect();

        for note in notes {
            debug!(
                "Extracted {} keywords from note {}",
                keywords.get(&note.id).map_or(0, |k| k.len()),
                note.id
            );
        }

        // A zero threshold lets disjoint pairs through, which the index would miss
        let index = match self.mode {
            SimilarityMode::Bucketed if self.threshold > 0.0 => {
                let ordered: Vec<KeywordSet> = notes
                    .iter()
                    .map(|note| keywords.get(&note.id).cloned().unwrap_or_default())
                    .collect();
                Some(TermIndex::build(&ordered))
            }
            _ => None,
        };

        let mut map = MindMap::default();
        let mut linked: HashSet<(usize, usize)> = HashSet::new();
        let positions: HashMap<&NoteId, usize> = notes
            .iter()
            .enumerate()
            .map(|(position, note)| (&note.id, position))
            .collect();

        for (position, note) in notes.iter().enumerate() {
            let parent = match &index {
                Some(index) => {
                    let candidates = keywords
                        .get(&note.id)
                        .map(|own| index.neighbors(position, own))
                        .unwrap_or_default();
                    self.hierarchy.find_parent_among(
                        note,
                        candidates.into_iter().map(|other| &notes[other]),
                        &keywords,
                    )
                }
                None => self.hierarchy.find_parent(note, notes, &keywords),
            };

            map.nodes.push(Node {
                id: note.id.clone(),
                label: self.label_for(&note.content),
                val: if parent.is_some() { 1 } else { 2 },
                color: self
                    .palette
                    .color_for(map.nodes.len(), parent.is_some())
                    .to_string(),
            });

            if let Some(parent_id) = parent {
                if let Some(&parent_position) = positions.get(&parent_id) {
                    linked.insert(ordered_pair(parent_position, position));
                }
                map.links.push(Link::hierarchical(parent_id, note.id.clone()));
            }
        }

        let hierarchical = map.links.len();

        for (i, first) in notes.iter().enumerate() {
            let Some(first_keywords) = keywords.get(&first.id) else {
                continue;
            };

            let later: Vec<usize> = match &index {
                Some(index) => index
                    .neighbors(i, first_keywords)
                    .into_iter()
                    .filter(|&j| j > i)
                    .collect(),
                None => (i + 1..notes.len()).collect(),
            };

            for j in later {
                if linked.contains(&(i, j)) {
                    continue;
                }
                let second = &notes[j];
                let Some(second_keywords) = keywords.get(&second.id) else {
                    continue;
                };

                let similarity = self.scorer().score(first_keywords, second_keywords);
                if similarity >= self.threshold {
                    map.links.push(Link::similarity(
                        first.id.clone(),
                        second.id.clone(),
                        similarity,
                    ));
                }
            }
        }

        info!(
            "Generated mind map ({} mode): {} nodes, {} hierarchical links, {} similarity links",
            self.mode.as_str(),
            map.nodes.len(),
            hierarchical,
            map.links.len() - hierarchical
        );

        map
    }

    /// Content cut to the label width, with an ellipsis when shortened.
    pub fn label_for(&self, content: &str) -> String {
        let mut chars = content.chars();
        let label: String = chars.by_ref().take(self.label_max_chars).collect();
        if chars.next().is_some() {
            format!("{}{}", label, self.label_ellipsis)
        } else {
            label
        }
    }
}

fn ordered_pair(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
