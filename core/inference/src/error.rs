use mindmap_schemas::NoteId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the edges of the engine: loading configuration and
/// importing notes supplied from outside the store.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("duplicate note id: {0}")]
    DuplicateNoteId(NoteId),

    #[error("note {id} has timestamp {timestamp}, earlier than preceding note at {previous}")]
    NonMonotonicTimestamp {
        id: NoteId,
        timestamp: i64,
        previous: i64,
    },
}

pub type Result<T> = std::result::Result<T, InferenceError>;
