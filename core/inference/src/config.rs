use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{InferenceError, Result};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "MINDMAP_CONFIG";

const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "that", "have", "with", "this", "from", "they", "would",
    "there", "their", "what", "about", "which", "when", "make", "like", "time", "just", "know",
    "take", "into", "year", "your", "good", "some", "could", "them", "than", "then", "look",
    "only", "come", "over", "think", "also", "back", "after", "work", "first", "well", "even",
    "want", "because", "these", "give", "most",
];

const DEFAULT_DOMAIN_TERMS: &[&str] = &[
    "cell",
    "structure",
    "function",
    "membrane",
    "nucleus",
    "organelle",
    "cytoplasm",
    "mitochondria",
    "protein",
    "dna",
    "rna",
    "biology",
    "unit",
    "body",
    "powerhouse",
    "energy",
    "organism",
];

const DEFAULT_PHRASE_MARKERS: &[&str] = &["cell", "structure", "function"];

const DEFAULT_CHILD_COLORS: &[&str] = &[
    "#2563eb", // Blue
    "#7c3aed", // Purple
    "#db2777", // Pink
    "#059669", // Emerald
    "#d97706", // Amber
];

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Candidate strategy for parent search and similarity links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimilarityMode {
    /// Compare every pair of notes
    #[serde(rename = "exact")]
    #[default]
    Exact,
    /// Only compare notes that share at least one keyword
    #[serde(rename = "bucketed")]
    Bucketed,
}

impl SimilarityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMode::Exact => "exact",
            SimilarityMode::Bucketed => "bucketed",
        }
    }
}

impl std::str::FromStr for SimilarityMode {
    type Err = InferenceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(SimilarityMode::Exact),
            "bucketed" => Ok(SimilarityMode::Bucketed),
            other => Err(InferenceError::InvalidConfig(format!(
                "unknown similarity mode '{}'",
                other
            ))),
        }
    }
}

/// Word lists driving keyword extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub stopwords: Vec<String>,
    pub domain_terms: Vec<String>,
    /// Substrings that make a 2- or 3-word phrase a keyword
    pub phrase_markers: Vec<String>,
    /// Tokens shorter than this are dropped
    pub min_token_len: usize,
    /// Non-domain words shorter than this are not kept as single keywords
    pub min_word_len: usize,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            stopwords: owned(DEFAULT_STOPWORDS),
            domain_terms: owned(DEFAULT_DOMAIN_TERMS),
            phrase_markers: owned(DEFAULT_PHRASE_MARKERS),
            min_token_len: 3,
            min_word_len: 4,
        }
    }
}

/// Per-term weights for the similarity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub anchor_term: String,
    pub child_markers: Vec<String>,
    pub anchor_weight: f64,
    pub child_marker_weight: f64,
    pub phrase_weight: f64,
    pub word_weight: f64,
    /// Extra weight for a child-marker term when either side holds the anchor term
    pub anchor_bonus: f64,
    /// Lower bound of the union size used as the divisor
    pub min_normalizer: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            anchor_term: "cell".to_string(),
            child_markers: owned(&["structure", "function"]),
            anchor_weight: 3.0,
            child_marker_weight: 2.5,
            phrase_weight: 2.0,
            word_weight: 1.0,
            anchor_bonus: 2.0,
            min_normalizer: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub root_color: String,
    pub child_colors: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            root_color: "#1e40af".to_string(), // Darker blue
            child_colors: owned(DEFAULT_CHILD_COLORS),
        }
    }
}

impl Palette {
    /// Color for the node emitted at position `index`.
    pub fn color_for(&self, index: usize, has_parent: bool) -> &str {
        if !has_parent || self.child_colors.is_empty() {
            return &self.root_color;
        }
        &self.child_colors[index % self.child_colors.len()]
    }
}

/// Full engine configuration. Every field defaults to the built-in tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    pub vocabulary: Vocabulary,
    pub scoring: ScoringWeights,
    pub palette: Palette,
    pub similarity_threshold: f64,
    pub label_max_chars: usize,
    pub label_ellipsis: String,
    pub mode: SimilarityMode,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            scoring: ScoringWeights::default(),
            palette: Palette::default(),
            similarity_threshold: 0.1,
            label_max_chars: 40,
            label_ellipsis: "...".to_string(),
            mode: SimilarityMode::Exact,
        }
    }
}

impl InferenceConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: InferenceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| InferenceError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&raw)?;
        info!("Loaded mind map config from {}", path.display());
        Ok(config)
    }

    /// Load from the file named by `MINDMAP_CONFIG`, or use defaults when unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_json_file(path.trim()),
            Ok(_) => {
                warn!("{} is set but empty, using default config", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn with_mode(mut self, mode: SimilarityMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.palette.child_colors.is_empty() {
            return Err(InferenceError::InvalidConfig(
                "palette.child_colors must not be empty".to_string(),
            ));
        }
        if !self.similarity_threshold.is_finite() || self.similarity_threshold < 0.0 {
            return Err(InferenceError::InvalidConfig(format!(
                "similarity_threshold must be a finite non-negative number, got {}",
                self.similarity_threshold
            )));
        }
        if self.scoring.min_normalizer == 0 {
            return Err(InferenceError::InvalidConfig(
                "scoring.min_normalizer must be positive".to_string(),
            ));
        }
        if self.scoring.anchor_term.is_empty() {
            return Err(InferenceError::InvalidConfig(
                "scoring.anchor_term must not be empty".to_string(),
            ));
        }
        if self.label_max_chars == 0 {
            return Err(InferenceError::InvalidConfig(
                "label_max_chars must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
