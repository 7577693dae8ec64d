//! Dual-stream fusion.
//!
//! Two filtered retrievals (self-authored, third-party) are tagged by
//! stream, concatenated primary first, stably sorted by score, and
//! deduplicated by source url. On score ties primary hits stay ahead.

pub mod authority;
pub mod dedup;

use tracing::{debug, info};

use recall_core::config::FusionConfig;
use recall_core::errors::RecallResult;
use recall_core::models::{FusedHit, FusedResult, RetrievalHit, SourceTag, TaggedStreams};
use recall_index::scorer::cmp_similarity_desc;

use crate::service::RetrievalService;
use authority::{tag_stream, Stream};
use dedup::dedup_by_source_url;

/// Merge two already-retrieved streams.
pub fn fuse_streams(primary: Vec<RetrievalHit>, supporting: Vec<RetrievalHit>) -> FusedResult {
    let streams = TaggedStreams {
        primary: tag_stream(primary, Stream::Primary),
        supporting: tag_stream(supporting, Stream::Supporting),
    };

    let mut merged: Vec<FusedHit> = streams
        .primary
        .iter()
        .chain(streams.supporting.iter())
        .cloned()
        .collect();
    merged.sort_by(|a, b| cmp_similarity_desc(a.score(), b.score()));
    let hits = dedup_by_source_url(merged);

    FusedResult { hits, streams }
}

/// Runs both fusion streams against one [`RetrievalService`].
pub struct DualStreamRetriever<'a> {
    service: &'a RetrievalService<'a>,
    self_source: SourceTag,
    guest_source: SourceTag,
    self_top_k: usize,
    guest_top_k: usize,
    parallel: bool,
}

impl<'a> DualStreamRetriever<'a> {
    pub fn new(service: &'a RetrievalService<'a>, config: &FusionConfig) -> Self {
        Self {
            service,
            self_source: SourceTag::new(config.self_source.as_str()),
            guest_source: SourceTag::new(config.guest_source.as_str()),
            self_top_k: config.self_top_k,
            guest_top_k: config.guest_top_k,
            parallel: config.parallel_streams,
        }
    }

    /// Retrieve and fuse both streams for `query`.
    ///
    /// The query is embedded once. Either stream failing fails the call;
    /// an empty result means both streams found nothing.
    pub fn retrieve(&self, query: &str) -> RecallResult<FusedResult> {
        let vector = self.service.embed(query)?;

        let primary = || {
            self.service
                .search_vector(&vector, self.self_top_k, Some(&self.self_source), None)
        };
        let supporting = || {
            self.service
                .search_vector(&vector, self.guest_top_k, Some(&self.guest_source), None)
        };

        let (primary, supporting) = if self.parallel {
            rayon::join(primary, supporting)
        } else {
            (primary(), supporting())
        };
        let (primary, supporting) = (primary?, supporting?);

        debug!(
            self_source = %self.self_source,
            guest_source = %self.guest_source,
            primary = primary.len(),
            supporting = supporting.len(),
            "fusion streams retrieved"
        );

        let fused = fuse_streams(primary, supporting);
        self.service.record_fused();
        info!(hits = fused.len(), "fused retrieval complete");
        Ok(fused)
    }
}

#[cfg(test)]
mod tests {
    use recall_core::models::{Authority, Metadata};

    use super::*;

    fn hit(url: &str, score: f64, source: &str) -> RetrievalHit {
        RetrievalHit {
            text: format!("{url}-{source}"),
            source: SourceTag::new(source),
            source_url: url.to_string(),
            score,
            metadata: Metadata::new(),
        }
    }

    #[test]
    fn shared_url_keeps_the_higher_score() {
        let fused = fuse_streams(
            vec![hit("a", 0.9, "self")],
            vec![hit("a", 0.5, "third-party"), hit("b", 0.7, "third-party")],
        );
        let summary: Vec<(&str, f64, Authority)> = fused
            .iter()
            .map(|h| (h.source_url(), h.score(), h.authority))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("a", 0.9, Authority::PrimaryBelief),
                ("b", 0.7, Authority::SupportingExample),
            ]
        );
    }

    #[test]
    fn tagged_streams_are_unsorted_and_undeduplicated() {
        let fused = fuse_streams(
            vec![hit("a", 0.2, "self"), hit("a", 0.8, "self")],
            vec![hit("c", 0.1, "third-party")],
        );
        assert_eq!(fused.streams.primary.len(), 2);
        assert_eq!(fused.streams.primary[0].score(), 0.2);
        assert_eq!(fused.streams.supporting.len(), 1);
        assert_eq!(fused.len(), 2);
    }

    #[test]
    fn ties_keep_primary_first() {
        let fused = fuse_streams(vec![hit("", 0.5, "self")], vec![hit("", 0.5, "third-party")]);
        assert_eq!(fused.hits[0].authority, Authority::PrimaryBelief);
        assert_eq!(fused.hits[1].authority, Authority::SupportingExample);
    }

    #[test]
    fn nan_scores_sort_last_without_panicking() {
        let primary: Vec<RetrievalHit> = (0..40)
            .map(|i| {
                let score = if i % 3 == 0 { f64::NAN } else { i as f64 / 40.0 };
                hit(&format!("p{i}"), score, "self")
            })
            .collect();
        let supporting = vec![hit("g", f64::NAN, "third-party"), hit("h", 0.99, "third-party")];

        let fused = fuse_streams(primary, supporting);

        assert_eq!(fused.len(), 42);
        assert_eq!(fused.hits[0].source_url(), "h");
        let first_nan = fused.iter().position(|h| h.score().is_nan()).unwrap();
        assert_eq!(first_nan, 42 - 15);
        assert!(fused.hits[first_nan..].iter().all(|h| h.score().is_nan()));
        assert!(fused.hits[..first_nan]
            .windows(2)
            .all(|w| w[0].score() >= w[1].score()));
    }

    #[test]
    fn both_empty_is_empty() {
        let fused = fuse_streams(Vec::new(), Vec::new());
        assert!(fused.is_empty());
        assert!(fused.streams.is_empty());
    }
}
