/// Retrieval service argument errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("top_k must be at least 1, got {top_k}")]
    InvalidTopK { top_k: usize },

    #[error("score threshold must be a number, got {threshold}")]
    InvalidThreshold { threshold: f64 },
}
