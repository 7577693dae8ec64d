//! # recall-observability
//!
//! Structured tracing setup and in-process metrics for the embedding cache
//! and retrieval paths.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{EmbeddingMetrics, MetricsCollector, RetrievalMetrics};
