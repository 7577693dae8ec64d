//! Query embedding cache.
//!
//! Normalized query → blake3 hash → vector, held in a bounded moka cache.

pub mod normalize;
mod query_cache;

pub use normalize::{content_hash, normalize_query};
pub use query_cache::{CacheOutcome, CacheStats, QueryEmbeddingCache};
