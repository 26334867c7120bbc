use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ULID and ID Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub String);

impl NoteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        NoteId(value.to_string())
    }
}

// ============================================================================
// Note Schema
// ============================================================================

/// A timestamped unit of user-entered text. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub timestamp: i64, // Unix epoch millis, creation order key
}

impl Note {
    pub fn new(id: impl Into<NoteId>, content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            timestamp,
        }
    }
}

// ============================================================================
// Graph Schema
// ============================================================================

/// Renderable node, one per note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NoteId,
    pub label: String,
    pub val: u32, // 2 for root notes, 1 for notes with a parent
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkKind {
    #[serde(rename = "hierarchical")]
    Hierarchical, // parent -> child, fixed value
    #[serde(rename = "similarity")]
    #[default]
    Similarity, // earlier note -> later note, value is the score
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Hierarchical => "hierarchical",
            LinkKind::Similarity => "similarity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: NoteId,
    pub target: NoteId,
    pub value: f64,
    #[serde(default)]
    pub kind: LinkKind,
}

impl Link {
    /// Weight carried by every parent -> child link.
    pub const HIERARCHICAL_VALUE: f64 = 2.0;

    pub fn hierarchical(parent: NoteId, child: NoteId) -> Self {
        Self {
            source: parent,
            target: child,
            value: Self::HIERARCHICAL_VALUE,
            kind: LinkKind::Hierarchical,
        }
    }

    pub fn similarity(earlier: NoteId, later: NoteId, score: f64) -> Self {
        Self {
            source: earlier,
            target: later,
            value: score,
            kind: LinkKind::Similarity,
        }
    }

    /// True when this link joins `a` and `b`, in either direction.
    pub fn connects(&self, a: &NoteId, b: &NoteId) -> bool {
        (&self.source == a && &self.target == b) || (&self.source == b && &self.target == a)
    }
}

/// Graph handed to a force-directed renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MindMap {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl MindMap {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    pub fn hierarchical_links(&self) -> impl Iterator<Item = &Link> {
        self.links
            .iter()
            .filter(|link| link.kind == LinkKind::Hierarchical)
    }

    pub fn similarity_links(&self) -> impl Iterator<Item = &Link> {
        self.links
            .iter()
            .filter(|link| link.kind == LinkKind::Similarity)
    }

    pub fn node(&self, id: &NoteId) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    pub fn parent_of(&self, id: &NoteId) -> Option<&NoteId> {
        self.hierarchical_links()
            .find(|link| &link.target == id)
            .map(|link| &link.source)
    }

    /// Children in the order they were linked.
    pub fn children_of(&self, id: &NoteId) -> Vec<&NoteId> {
        self.hierarchical_links()
            .filter(|link| &link.source == id)
            .map(|link| &link.target)
            .collect()
    }

    /// A root is a node that no hierarchical link points at.
    pub fn is_root(&self, id: &NoteId) -> bool {
        self.parent_of(id).is_none()
    }
}

/// Read model exposed to the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MindMapSnapshot {
    pub notes: Vec<Note>,
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

// ============================================================================
// Helper Functions
// ============================================================================

pub fn generate_note_id() -> NoteId {
    NoteId(format!("note_{}", ulid::Ulid::new()))
}
