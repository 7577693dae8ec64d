use crate::errors::RecallResult;
use crate::models::{Metadata, SourceTag};

/// Backend-native closeness of a hit, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawScore {
    /// Similarity reported by the backend (higher is closer).
    Similarity(f64),
    /// Distance reported by the backend (lower is closer, `>= 0`).
    Distance(f64),
}

/// Payload fields needed to rebuild a chunk view.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkPayload {
    pub text: String,
    pub source: SourceTag,
    pub source_url: String,
    pub metadata: Metadata,
}

/// One raw hit from a vector index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexHit {
    pub id: String,
    pub raw_score: RawScore,
    pub payload: ChunkPayload,
}

/// Approximate nearest-neighbor search over one collection.
///
/// Implementations return at most `k` hits, best first. A missing or empty
/// collection is reported as `IndexError::Unavailable`, which callers treat
/// as zero hits. Any other failure is `IndexError::BackendCall` and must
/// propagate.
pub trait IVectorIndex: Send + Sync {
    /// Search the collection, optionally restricted to one `source` value.
    fn search(
        &self,
        vector: &[f32],
        k: usize,
        filter: Option<&SourceTag>,
    ) -> RecallResult<Vec<IndexHit>>;

    /// Name of the collection being searched.
    fn collection(&self) -> &str;

    /// Backend name for logs.
    fn name(&self) -> &str;
}
