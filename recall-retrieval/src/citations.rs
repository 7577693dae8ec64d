//! Source citations shown under an answer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use recall_core::models::{Authority, FusedResult, RetrievalHit, SourceTag};

/// One cited source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub source: SourceTag,
    pub url: String,
    pub score: f64,
    /// Set for citations taken from a fused result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<Authority>,
}

impl SourceCitation {
    /// Similarity as a whole percentage, truncated (`0.876` → `87`).
    pub fn match_percent(&self) -> u32 {
        (self.score.clamp(0.0, 1.0) * 100.0) as u32
    }
}

/// Citations from a fused result, in result order.
pub fn from_fused(result: &FusedResult) -> Vec<SourceCitation> {
    dedup_citations(
        result
            .iter()
            .map(|fused| (&fused.hit, Some(fused.authority))),
    )
}

/// Citations from plain hits, in the given order.
pub fn from_hits(hits: &[RetrievalHit]) -> Vec<SourceCitation> {
    dedup_citations(hits.iter().map(|hit| (hit, None)))
}

/// First hit per non-empty url; hits without a url are not citable.
fn dedup_citations<'a>(
    hits: impl Iterator<Item = (&'a RetrievalHit, Option<Authority>)>,
) -> Vec<SourceCitation> {
    let mut seen: HashSet<&str> = HashSet::new();
    hits.filter(|&(hit, _)| hit.has_source_url() && seen.insert(hit.source_url.as_str()))
        .map(|(hit, authority)| SourceCitation {
            source: hit.source.clone(),
            url: hit.source_url.clone(),
            score: hit.score,
            authority,
        })
        .collect()
}
