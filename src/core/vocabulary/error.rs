//! Error types for vocabulary loading.

use thiserror::Error;

/// Unified error type for vocabulary archive and index operations.
#[derive(Debug, Error)]
pub enum VocabularyError {
    /// Archive container could not be opened or walked.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// An entry inside the archive could not be read.
    #[error("Archive entry error: {0}")]
    Entry(String),

    /// Malformed article path or headword line.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Strong's companion source could not be decoded.
    #[error("Strong's list error: {0}")]
    StrongsList(#[from] serde_json::Error),

    /// IO error while reading archive bytes.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VocabularyError {
    /// Create an entry error with the given message.
    pub fn entry(msg: impl Into<String>) -> Self {
        Self::Entry(msg.into())
    }

    /// Create a parse error with the given message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

/// Result type alias for vocabulary operations.
pub type VocabularyResult<T> = Result<T, VocabularyError>;
