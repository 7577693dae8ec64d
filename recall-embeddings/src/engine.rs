//! EmbeddingEngine: the main entry point for recall-embeddings.
//!
//! Owns the configured provider and the query cache. Implements
//! `IEmbeddingProvider` so it can stand in wherever a provider is expected.

use std::time::Duration;

use recall_core::config::EmbeddingConfig;
use recall_core::errors::{EmbeddingError, RecallError, RecallResult};
use recall_core::traits::IEmbeddingProvider;
use tracing::{debug, info};

use crate::cache::{normalize_query, CacheOutcome, CacheStats, QueryEmbeddingCache};
use crate::providers;

/// The main embedding engine.
pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    cache: QueryEmbeddingCache,
    dimensions: usize,
}

impl EmbeddingEngine {
    /// Create an engine with the provider named in `config`.
    pub fn new(config: &EmbeddingConfig) -> RecallResult<Self> {
        let provider = providers::create_provider(config)?;
        Ok(Self::with_provider(provider, config))
    }

    /// Create an engine around an already-built provider.
    ///
    /// `config.dimensions` is the dimension every embedding must have.
    pub fn with_provider(provider: Box<dyn IEmbeddingProvider>, config: &EmbeddingConfig) -> Self {
        let ttl = config.query_cache_ttl_secs.map(Duration::from_secs);
        let cache = QueryEmbeddingCache::new(config.query_cache_capacity, ttl);

        info!(
            provider = provider.name(),
            dims = config.dimensions,
            cache_capacity = config.query_cache_capacity,
            cache_ttl_secs = ?config.query_cache_ttl_secs,
            "EmbeddingEngine initialized"
        );

        Self {
            provider,
            cache,
            dimensions: config.dimensions,
        }
    }

    /// Embed a query through the cache.
    pub fn embed_query(&self, query: &str) -> RecallResult<Vec<f32>> {
        self.embed_query_with_outcome(query).map(|(vector, _)| vector)
    }

    /// Embed a query through the cache, reporting whether it was a hit.
    ///
    /// A vector of the wrong dimension is rejected before it reaches the cache.
    pub fn embed_query_with_outcome(&self, query: &str) -> RecallResult<(Vec<f32>, CacheOutcome)> {
        if normalize_query(query).is_empty() {
            return Err(EmbeddingError::InvalidInput {
                reason: "query is empty".to_string(),
            }
            .into());
        }

        let (vector, outcome) = self.cache.get_or_compute(query, |normalized| {
            let vector = self.provider.embed(normalized).map_err(into_embedding_error)?;
            check_dimensions(&vector, self.dimensions)?;
            Ok(vector)
        })?;

        debug!(outcome = ?outcome, tier = "l1", dims = vector.len(), "query embedded");
        Ok((vector, outcome))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached query vector.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn check_dimensions(vector: &[f32], expected: usize) -> Result<(), EmbeddingError> {
    if vector.len() != expected {
        return Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: vector.len(),
        });
    }
    Ok(())
}

fn into_embedding_error(err: RecallError) -> EmbeddingError {
    match err {
        RecallError::EmbeddingError(e) => e,
        other => EmbeddingError::InferenceFailed {
            reason: other.to_string(),
        },
    }
}

/// Uncached passthrough to the provider, with dimension checks.
impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> RecallResult<Vec<f32>> {
        let vector = self.provider.embed(text)?;
        check_dimensions(&vector, self.dimensions)?;
        Ok(vector)
    }

    fn embed_batch(&self, texts: &[String]) -> RecallResult<Vec<Vec<f32>>> {
        let vectors = self.provider.embed_batch(texts)?;
        for v in &vectors {
            check_dimensions(v, self.dimensions)?;
        }
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        self.provider.name()
    }
}
