use thiserror::Error;

// Core internal errors
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Error loading dataset from remote source: {0}")]
    DataSource(String),

    #[error("Invalid segment ID format: {0}")]
    MalformedId(String),

    #[error("IO error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot cache encoding error: {0}")]
    CacheFormat(#[from] serde_json::Error),
}
