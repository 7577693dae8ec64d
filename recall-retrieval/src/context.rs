//! RecallContext: the explicit handle owning every long-lived component.
//!
//! Opened once from a [`RecallConfig`], passed by reference, and closed
//! explicitly. There is no global state.

use std::sync::{Mutex, PoisonError};

use tracing::info;

use recall_core::config::RecallConfig;
use recall_core::errors::RecallResult;
use recall_core::models::{FusedResult, RetrievalHit, SourceTag};
use recall_core::traits::IVectorIndex;
use recall_embeddings::{CacheStats, EmbeddingEngine};
use recall_index::open_index;
use recall_observability::MetricsCollector;

use crate::fusion::DualStreamRetriever;
use crate::routing::{self, RetrievalOutcome, RetrievalRequest};
use crate::service::RetrievalService;

pub struct RecallContext {
    config: RecallConfig,
    embedder: EmbeddingEngine,
    index: Box<dyn IVectorIndex>,
    metrics: Mutex<MetricsCollector>,
}

impl RecallContext {
    /// Validate `config`, build the embedding provider, and open the index.
    pub fn open(config: RecallConfig) -> RecallResult<Self> {
        config.validate()?;
        let embedder = EmbeddingEngine::new(&config.embedding)?;
        let index = open_index(&config.index)?;
        Ok(Self::from_parts(config, embedder, index))
    }

    /// Assemble a context from already-built components.
    pub fn from_parts(
        config: RecallConfig,
        embedder: EmbeddingEngine,
        index: Box<dyn IVectorIndex>,
    ) -> Self {
        info!(
            provider = embedder.provider_name(),
            backend = index.name(),
            collection = index.collection(),
            "recall context opened"
        );
        Self {
            config,
            embedder,
            index,
            metrics: Mutex::new(MetricsCollector::new()),
        }
    }

    pub fn config(&self) -> &RecallConfig {
        &self.config
    }

    pub fn embedder(&self) -> &EmbeddingEngine {
        &self.embedder
    }

    pub fn index(&self) -> &dyn IVectorIndex {
        self.index.as_ref()
    }

    /// A retrieval service borrowing this context's components.
    pub fn service(&self) -> RetrievalService<'_> {
        let service = RetrievalService::new(&self.embedder, self.index.as_ref());
        if self.config.observability.metrics_enabled {
            service.with_metrics(&self.metrics)
        } else {
            service
        }
    }

    /// `search` with `retrieval.top_k` and `retrieval.score_threshold`.
    pub fn search(&self, query: &str) -> RecallResult<Vec<RetrievalHit>> {
        let retrieval = &self.config.retrieval;
        self.service()
            .search(query, retrieval.top_k, retrieval.score_threshold)
    }

    /// `search_with_filter` with `retrieval.top_k`.
    pub fn search_with_filter(
        &self,
        query: &str,
        source: &SourceTag,
    ) -> RecallResult<Vec<RetrievalHit>> {
        self.service()
            .search_with_filter(query, source, self.config.retrieval.top_k)
    }

    /// Dual-stream retrieval with the configured sources and stream sizes.
    pub fn retrieve_fused(&self, query: &str) -> RecallResult<FusedResult> {
        let service = self.service();
        DualStreamRetriever::new(&service, &self.config.fusion).retrieve(query)
    }

    /// Fused or single-source retrieval, depending on the request.
    pub fn route(&self, request: &RetrievalRequest) -> RecallResult<RetrievalOutcome> {
        routing::route(
            &self.service(),
            &self.config.fusion,
            &self.config.retrieval,
            request,
        )
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.embedder.cache_stats()
    }

    /// Copy of the current metrics.
    pub fn metrics_snapshot(&self) -> MetricsCollector {
        self.metrics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Release the index and cache, returning the final metrics.
    pub fn close(self) -> MetricsCollector {
        let metrics = self
            .metrics
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        let cache = self.embedder.cache_stats();
        info!(
            queries = metrics.retrieval.queries,
            fused = metrics.retrieval.fused_queries,
            degraded = metrics.retrieval.degraded,
            cache_hits = cache.hits,
            cache_misses = cache.misses,
            "recall context closed"
        );
        metrics
    }
}
