use std::fmt;

use serde::{Deserialize, Serialize};

use super::RetrievalHit;
use crate::constants::{AUTHORITY_PRIMARY_LABEL, AUTHORITY_SUPPORTING_LABEL};

/// Evidence weight of a fused hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Authority {
    /// Self-authored content.
    #[serde(rename = "primary belief")]
    PrimaryBelief,
    /// Third-party content.
    #[serde(rename = "supporting example")]
    SupportingExample,
}

impl Authority {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PrimaryBelief => AUTHORITY_PRIMARY_LABEL,
            Self::SupportingExample => AUTHORITY_SUPPORTING_LABEL,
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A retrieval hit annotated with its authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedHit {
    #[serde(flatten)]
    pub hit: RetrievalHit,
    pub authority: Authority,
}

impl FusedHit {
    pub fn new(hit: RetrievalHit, authority: Authority) -> Self {
        Self { hit, authority }
    }

    pub fn score(&self) -> f64 {
        self.hit.score
    }

    pub fn source_url(&self) -> &str {
        &self.hit.source_url
    }
}

/// Both streams after tagging, in backend order, before merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaggedStreams {
    pub primary: Vec<FusedHit>,
    pub supporting: Vec<FusedHit>,
}

impl TaggedStreams {
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.supporting.is_empty()
    }
}

/// Output of dual-stream fusion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FusedResult {
    /// Merged, deduplicated, score-descending.
    pub hits: Vec<FusedHit>,
    /// Stream-level view for callers presenting sections separately.
    pub streams: TaggedStreams,
}

impl FusedResult {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FusedHit> {
        self.hits.iter()
    }
}
