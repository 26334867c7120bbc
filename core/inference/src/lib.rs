pub mod config;
pub mod error;
pub mod hierarchy;
pub mod keywords;
pub mod similarity;
pub mod store;
pub mod synthesizer;
pub mod term_index;

pub use config::{
    InferenceConfig, Palette, ScoringWeights, SimilarityMode, Vocabulary, CONFIG_ENV_VAR,
};
pub use error::{InferenceError, Result};
pub use hierarchy::HierarchyBuilder;
pub use keywords::{KeywordExtractor, KeywordSet};
pub use similarity::SimilarityScorer;
pub use store::MindMapStore;
pub use synthesizer::GraphSynthesizer;
pub use term_index::TermIndex;
