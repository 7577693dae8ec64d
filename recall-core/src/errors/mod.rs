//! Error taxonomy.
//!
//! One `thiserror` enum per subsystem, unified under [`RecallError`].

mod embedding_error;
mod index_error;
mod retrieval_error;

pub use embedding_error::EmbeddingError;
pub use index_error::IndexError;
pub use retrieval_error::RetrievalError;

/// Top-level error for every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum RecallError {
    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("index error: {0}")]
    IndexError(#[from] IndexError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl RecallError {
    /// Whether the condition should degrade to "zero hits" instead of failing
    /// the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::IndexError(IndexError::Unavailable { .. }))
    }
}

pub type RecallResult<T> = Result<T, RecallError>;
