//! RetrievalService: embed, search, normalize, threshold.

use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use tracing::{debug, warn};

use recall_core::errors::{RecallError, RecallResult, RetrievalError};
use recall_core::models::{RetrievalHit, SourceTag};
use recall_core::traits::{IVectorIndex, IndexHit};
use recall_embeddings::{CacheOutcome, EmbeddingEngine};
use recall_index::scorer::{cmp_similarity_desc, normalize, passes_threshold};
use recall_observability::MetricsCollector;

/// Composes the embedding engine, a vector index, and the scorer.
///
/// Borrowed views only; the owner is usually a [`crate::RecallContext`].
pub struct RetrievalService<'a> {
    embedder: &'a EmbeddingEngine,
    index: &'a dyn IVectorIndex,
    metrics: Option<&'a Mutex<MetricsCollector>>,
}

impl<'a> RetrievalService<'a> {
    pub fn new(embedder: &'a EmbeddingEngine, index: &'a dyn IVectorIndex) -> Self {
        Self {
            embedder,
            index,
            metrics: None,
        }
    }

    /// Record outcomes into `metrics`.
    pub fn with_metrics(mut self, metrics: &'a Mutex<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Top `top_k` hits with similarity `>= score_threshold`, best first.
    ///
    /// A missing or empty collection yields `Ok(vec![])`.
    pub fn search(
        &self,
        query: &str,
        top_k: usize,
        score_threshold: f64,
    ) -> RecallResult<Vec<RetrievalHit>> {
        validate_top_k(top_k)?;
        if score_threshold.is_nan() {
            return Err(RetrievalError::InvalidThreshold {
                threshold: score_threshold,
            }
            .into());
        }
        let vector = self.embed(query)?;
        self.search_vector(&vector, top_k, None, Some(score_threshold))
    }

    /// Top `top_k` hits whose source equals `source`, best first.
    ///
    /// No similarity threshold is applied here.
    pub fn search_with_filter(
        &self,
        query: &str,
        source: &SourceTag,
        top_k: usize,
    ) -> RecallResult<Vec<RetrievalHit>> {
        validate_top_k(top_k)?;
        let vector = self.embed(query)?;
        self.search_vector(&vector, top_k, Some(source), None)
    }

    /// Embed through the engine's cache, recording the outcome.
    pub fn embed(&self, query: &str) -> RecallResult<Vec<f32>> {
        let started = Instant::now();
        let result = self.embedder.embed_query_with_outcome(query);
        self.with_collector(|m| match &result {
            Ok((_, CacheOutcome::Hit)) => m.embedding.record_hit(),
            Ok((_, CacheOutcome::Miss)) => m.embedding.record_miss(started.elapsed()),
            Err(_) => m.embedding.record_failure(),
        });
        result.map(|(vector, _)| vector)
    }

    /// Search with a precomputed query vector.
    ///
    /// `threshold` of `None` keeps every hit the index returns.
    pub fn search_vector(
        &self,
        vector: &[f32],
        top_k: usize,
        filter: Option<&SourceTag>,
        threshold: Option<f64>,
    ) -> RecallResult<Vec<RetrievalHit>> {
        validate_top_k(top_k)?;

        let raw = match self.index.search(vector, top_k, filter) {
            Ok(raw) => raw,
            Err(e) if e.is_recoverable() => {
                warn!(
                    collection = self.index.collection(),
                    backend = self.index.name(),
                    source = filter.map(SourceTag::as_str),
                    error = %e,
                    "index unavailable, returning no hits"
                );
                self.with_collector(|m| {
                    m.retrieval.record_degraded();
                    m.retrieval.record_query(&[], std::iter::empty());
                });
                return Ok(Vec::new());
            }
            Err(e) => {
                self.with_collector(|m| m.retrieval.record_failure());
                return Err(e);
            }
        };

        let hits = rank(raw, top_k, threshold);

        debug!(
            collection = self.index.collection(),
            source = filter.map(SourceTag::as_str),
            top_k,
            threshold = ?threshold,
            hits = hits.len(),
            "retrieval complete"
        );

        self.with_collector(|m| {
            let scores: Vec<f64> = hits.iter().map(|h| h.score).collect();
            m.retrieval
                .record_query(&scores, hits.iter().map(|h| h.source.as_str()));
        });

        Ok(hits)
    }

    pub(crate) fn record_fused(&self) {
        self.with_collector(|m| m.retrieval.record_fused());
    }

    fn with_collector(&self, f: impl FnOnce(&mut MetricsCollector)) {
        if let Some(metrics) = self.metrics {
            let mut guard = metrics.lock().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard);
        }
    }
}

fn validate_top_k(top_k: usize) -> Result<(), RecallError> {
    if top_k == 0 {
        return Err(RetrievalError::InvalidTopK { top_k }.into());
    }
    Ok(())
}

/// Normalize, threshold, order best first (stable), cap at `top_k`.
fn rank(raw: Vec<IndexHit>, top_k: usize, threshold: Option<f64>) -> Vec<RetrievalHit> {
    let mut hits: Vec<RetrievalHit> = raw
        .into_iter()
        .map(|hit| RetrievalHit {
            text: hit.payload.text,
            source: hit.payload.source,
            source_url: hit.payload.source_url,
            score: normalize(hit.raw_score),
            metadata: hit.payload.metadata,
        })
        .filter(|hit| threshold.map_or(true, |t| passes_threshold(hit.score, t)))
        .collect();

    hits.sort_by(|a, b| cmp_similarity_desc(a.score, b.score));
    hits.truncate(top_k);
    hits
}
