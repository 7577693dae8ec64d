//! Bounded in-memory query embedding cache using moka.
//!
//! TinyLFU admission, size-bounded eviction, optional TTL. Concurrent misses
//! on the same key are coalesced into a single computation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::sync::Cache;
use recall_core::errors::EmbeddingError;
use tracing::debug;

use super::normalize::{content_hash, normalize_query};

/// Whether a lookup was served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Miss,
}

/// Point-in-time cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
}

/// Query embedding cache keyed by the blake3 hash of the normalized query.
pub struct QueryEmbeddingCache {
    cache: Cache<String, Vec<f32>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl QueryEmbeddingCache {
    /// Create a cache holding at most `max_entries` vectors.
    pub fn new(max_entries: u64, ttl: Option<Duration>) -> Self {
        let mut builder = Cache::<String, Vec<f32>>::builder().max_capacity(max_entries);
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            cache: builder.build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached vector for `query`, computing it with `embed_fn` on a miss.
    ///
    /// `embed_fn` receives the normalized query and runs at most once per key,
    /// even under concurrent callers. If it fails, nothing is stored and the
    /// error is returned. The returned vector is an owned copy.
    pub fn get_or_compute<F>(
        &self,
        query: &str,
        embed_fn: F,
    ) -> Result<(Vec<f32>, CacheOutcome), EmbeddingError>
    where
        F: FnOnce(&str) -> Result<Vec<f32>, EmbeddingError>,
    {
        let normalized = normalize_query(query);
        let key = content_hash(&normalized);

        let mut computed = false;
        let vector = self
            .cache
            .try_get_with(key.clone(), || {
                computed = true;
                embed_fn(&normalized)
            })
            .map_err(|e| (*e).clone())?;

        let outcome = if computed {
            self.misses.fetch_add(1, Ordering::Relaxed);
            CacheOutcome::Miss
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
            CacheOutcome::Hit
        };
        debug!(hash = %key, outcome = ?outcome, "query embedding lookup");

        Ok((vector, outcome))
    }

    /// Look up without computing.
    pub fn get(&self, query: &str) -> Option<Vec<f32>> {
        self.cache.get(&content_hash(&normalize_query(query)))
    }

    /// Number of cached vectors.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    /// Drop every cached vector. Counters are kept.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
