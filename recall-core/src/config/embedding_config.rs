use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "ollama", "api", "tfidf".
    pub provider: String,
    /// Model name sent to the provider.
    pub model: String,
    /// Embedding dimensions. Must match the dimension the index was built with.
    pub dimensions: usize,
    /// Provider base URL or endpoint. Provider default when `None`.
    pub base_url: Option<String>,
    /// Bearer key for the "api" provider.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Maximum number of cached query embeddings.
    pub query_cache_capacity: u64,
    /// Optional time-to-live for cached query embeddings.
    pub query_cache_ttl_secs: Option<u64>,
    /// HTTP timeout for remote providers.
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            base_url: None,
            api_key: None,
            query_cache_capacity: defaults::DEFAULT_QUERY_CACHE_CAPACITY,
            query_cache_ttl_secs: None,
            timeout_secs: defaults::DEFAULT_EMBEDDING_TIMEOUT_SECS,
        }
    }
}
