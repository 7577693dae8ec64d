//! Central metrics registry.
//!
//! [`MetricsCollector`] owns the embedding and retrieval collectors.

pub mod embedding_metrics;
pub mod retrieval_metrics;

pub use embedding_metrics::EmbeddingMetrics;
pub use retrieval_metrics::RetrievalMetrics;

/// Central metrics registry that owns all domain-specific collectors.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct MetricsCollector {
    pub retrieval: RetrievalMetrics,
    pub embedding: EmbeddingMetrics,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all metrics (useful for testing or periodic rotation).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// JSON snapshot for export.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
