use chrono::Utc;
use mindmap_schemas::{generate_note_id, Link, MindMap, MindMapSnapshot, Node, Note, NoteId};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::config::InferenceConfig;
use crate::error::{InferenceError, Result};
use crate::synthesizer::GraphSynthesizer;

/// Owns the note collection and the graph derived from it.
///
/// Every mutation recomputes the graph from scratch and replaces the previous
/// value wholesale; nothing is patched incrementally.
pub struct MindMapStore {
    synthesizer: GraphSynthesizer,
    notes: Vec<Note>,
    graph: MindMap,
}

impl Default for MindMapStore {
    fn default() -> Self {
        Self::new(&InferenceConfig::default())
    }
}

impl MindMapStore {
    pub fn new(config: &InferenceConfig) -> Self {
        Self::with_synthesizer(GraphSynthesizer::new(config))
    }

    pub fn with_synthesizer(synthesizer: GraphSynthesizer) -> Self {
        Self {
            synthesizer,
            notes: Vec::new(),
            graph: MindMap::default(),
        }
    }

    /// Append a note stamped with the current time and rebuild the graph.
    pub fn add_note(&mut self, content: impl Into<String>) -> NoteId {
        let timestamp = self.next_timestamp(Utc::now().timestamp_millis());
        let note = Note {
            id: generate_note_id(),
            content: content.into(),
            timestamp,
        };
        let id = note.id.clone();

        debug!("Adding note {} at {}", id, timestamp);
        self.notes.push(note);
        self.recompute();

        id
    }

    /// Append externally created notes, then rebuild once.
    ///
    /// Ids must be unique across the store and timestamps must not go
    /// backwards. On error nothing is appended.
    pub fn import_notes(&mut self, notes: Vec<Note>) -> Result<()> {
        let mut seen: HashSet<&NoteId> = self.notes.iter().map(|note| &note.id).collect();
        let mut previous = self.notes.last().map(|note| note.timestamp);

        for note in &notes {
            if !seen.insert(&note.id) {
                return Err(InferenceError::DuplicateNoteId(note.id.clone()));
            }
            if let Some(previous) = previous {
                if note.timestamp < previous {
                    return Err(InferenceError::NonMonotonicTimestamp {
                        id: note.id.clone(),
                        timestamp: note.timestamp,
                        previous,
                    });
                }
            }
            previous = Some(note.timestamp);
        }

        info!("Importing {} notes", notes.len());
        self.notes.extend(notes);
        self.recompute();
        Ok(())
    }

    pub fn clear_all(&mut self) {
        info!("Clearing {} notes", self.notes.len());
        self.notes.clear();
        self.graph = MindMap::default();
    }

    pub fn recompute(&mut self) {
        self.graph = self.synthesizer.generate(&self.notes);
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn nodes(&self) -> &[Node] {
        &self.graph.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.graph.links
    }

    pub fn graph(&self) -> &MindMap {
        &self.graph
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn snapshot(&self) -> MindMapSnapshot {
        MindMapSnapshot {
            notes: self.notes.clone(),
            nodes: self.graph.nodes.clone(),
            links: self.graph.links.clone(),
        }
    }

    // Strictly increasing, so notes added within one millisecond keep their order
    fn next_timestamp(&self, now: i64) -> i64 {
        match self.notes.last() {
            Some(last) if now <= last.timestamp => last.timestamp + 1,
            _ => now,
        }
    }
}
