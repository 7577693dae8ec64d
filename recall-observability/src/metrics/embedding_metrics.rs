//! Query cache hit rate and embedding latency.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const MAX_LATENCY_SAMPLES: usize = 10_000;

/// Embedding subsystem metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddingMetrics {
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Lookups that ended in a provider error.
    pub failures: u64,
    /// Provider latency samples in microseconds, misses only.
    latency_samples_us: Vec<u64>,
}

impl EmbeddingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self) {
        self.cache_hits += 1;
    }

    /// Record a miss and the time the provider took.
    pub fn record_miss(&mut self, latency: Duration) {
        self.cache_misses += 1;
        self.latency_samples_us.push(latency.as_micros() as u64);
        if self.latency_samples_us.len() > MAX_LATENCY_SAMPLES {
            let excess = self.latency_samples_us.len() - MAX_LATENCY_SAMPLES;
            self.latency_samples_us.drain(..excess);
        }
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn total_lookups(&self) -> u64 {
        self.cache_hits + self.cache_misses + self.failures
    }

    /// Fraction of lookups served from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_lookups();
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }

    /// Provider latency at the given percentile (0.0–1.0).
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.latency_samples_us.is_empty() {
            return Duration::ZERO;
        }
        let mut sorted = self.latency_samples_us.clone();
        sorted.sort_unstable();
        let idx = ((p * (sorted.len() - 1) as f64).round() as usize).min(sorted.len() - 1);
        Duration::from_micros(sorted[idx])
    }
}
