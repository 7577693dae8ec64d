//! Stream → authority label.

use recall_core::models::{Authority, FusedHit, RetrievalHit};

/// Which fusion stream a hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// Self-authored (`fusion.self_source`).
    Primary,
    /// Third-party (`fusion.guest_source`).
    Supporting,
}

impl Stream {
    pub fn authority(self) -> Authority {
        match self {
            Self::Primary => Authority::PrimaryBelief,
            Self::Supporting => Authority::SupportingExample,
        }
    }
}

/// Label every hit of one stream, preserving order.
pub fn tag_stream(hits: Vec<RetrievalHit>, stream: Stream) -> Vec<FusedHit> {
    let authority = stream.authority();
    hits.into_iter()
        .map(|hit| FusedHit::new(hit, authority))
        .collect()
}
