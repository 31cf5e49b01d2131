use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EffectorError {
    #[error("Malformed FASTA input: {0}")]
    InputParse(String),

    #[error("Failed to read input {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Sequence is empty")]
    EmptySequence,

    #[error("Failed to load model {path}: {message}")]
    ModelLoad { path: PathBuf, message: String },

    #[error("Model is incompatible with the extracted features: {0}")]
    ModelIncompatible(String),

    #[error("Failed to write {path}: {message}")]
    OutputWrite { path: PathBuf, message: String },
}

impl EffectorError {
    /// Per-record failures; the rest abort the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EffectorError::EmptySequence)
    }
}

pub type EffectorResult<T> = Result<T, EffectorError>;
