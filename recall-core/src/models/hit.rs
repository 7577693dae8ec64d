use serde::{Deserialize, Serialize};

use super::{Metadata, SourceTag};

/// One result of a retrieval call. Owns its data; nothing here aliases the
/// cache or the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalHit {
    pub text: String,
    pub source: SourceTag,
    pub source_url: String,
    /// Normalized similarity in [0, 1]. Higher is more relevant.
    pub score: f64,
    pub metadata: Metadata,
}

impl RetrievalHit {
    /// Whether the hit carries a canonical source identity usable for dedup.
    pub fn has_source_url(&self) -> bool {
        !self.source_url.is_empty()
    }
}
