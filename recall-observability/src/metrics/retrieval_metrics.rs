//! Query counts, empty/degraded results, per-source hit counts, mean top-3 similarity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tracks retrieval outcomes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalMetrics {
    /// Plain, filtered, and fused calls.
    pub queries: u64,
    pub fused_queries: u64,
    /// Calls that returned no hits.
    pub empty_results: u64,
    /// Calls degraded to zero hits because the index was unavailable.
    pub degraded: u64,
    /// Calls that returned an error.
    pub failures: u64,
    /// Hits returned per source tag.
    pub hits_by_source: BTreeMap<String, u64>,
    /// Sum of per-query mean top-3 similarity, over non-empty queries.
    top3_sum: f64,
    top3_count: u64,
}

impl RetrievalMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successful retrieval.
    ///
    /// `scores` are the returned similarities, best first; `sources` their tags.
    pub fn record_query<'a>(
        &mut self,
        scores: &[f64],
        sources: impl IntoIterator<Item = &'a str>,
    ) {
        self.queries += 1;
        if scores.is_empty() {
            self.empty_results += 1;
            return;
        }
        for source in sources {
            *self.hits_by_source.entry(source.to_string()).or_default() += 1;
        }
        let top = &scores[..scores.len().min(3)];
        self.top3_sum += top.iter().sum::<f64>() / top.len() as f64;
        self.top3_count += 1;
    }

    pub fn record_fused(&mut self) {
        self.fused_queries += 1;
    }

    /// Record a call that degraded to zero hits.
    pub fn record_degraded(&mut self) {
        self.degraded += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    /// Mean over queries of each query's mean top-3 similarity.
    pub fn mean_top3_similarity(&self) -> f64 {
        if self.top3_count == 0 {
            0.0
        } else {
            self.top3_sum / self.top3_count as f64
        }
    }

    /// Fraction of queries that returned at least one hit.
    pub fn hit_rate(&self) -> f64 {
        if self.queries == 0 {
            return 0.0;
        }
        (self.queries - self.empty_results) as f64 / self.queries as f64
    }
}
