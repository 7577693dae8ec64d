//! Configuration for every subsystem, loadable from TOML.
//!
//! Every section is `#[serde(default)]`, so a partial file (or an empty one)
//! yields a usable configuration.

pub mod defaults;
mod embedding_config;
mod fusion_config;
mod index_config;
mod observability_config;
mod retrieval_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use embedding_config::EmbeddingConfig;
pub use fusion_config::FusionConfig;
pub use index_config::{DistanceMetric, IndexConfig, QdrantApi, QdrantIndexConfig, SqliteIndexConfig};
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;

use crate::errors::{RecallError, RecallResult};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallConfig {
    pub embedding: EmbeddingConfig,
    pub index: IndexConfig,
    pub retrieval: RetrievalConfig,
    pub fusion: FusionConfig,
    pub observability: ObservabilityConfig,
}

impl RecallConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml(content: &str) -> RecallResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| RecallError::ConfigError(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file, apply environment overrides, and validate.
    pub fn load(path: &Path) -> RecallResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RecallError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        let mut config: Self = toml::from_str(&content)
            .map_err(|e| RecallError::ConfigError(format!("{}: {e}", path.display())))?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Override connection settings from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Override connection settings from an arbitrary lookup.
    ///
    /// Recognized keys: `QDRANT_URL`, `QDRANT_API_KEY`, `QDRANT_COLLECTION_NAME`,
    /// `EMBEDDING_MODEL`, `EMBEDDING_API_KEY`, `RECALL_DB_PATH`.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("QDRANT_URL") {
            self.index.qdrant.url = url;
        }
        if let Some(key) = get("QDRANT_API_KEY") {
            self.index.qdrant.api_key = Some(key);
        }
        if let Some(collection) = get("QDRANT_COLLECTION_NAME") {
            self.index.collection = collection;
        }
        if let Some(model) = get("EMBEDDING_MODEL") {
            self.embedding.model = model;
        }
        if let Some(key) = get("EMBEDDING_API_KEY") {
            self.embedding.api_key = Some(key);
        }
        if let Some(path) = get("RECALL_DB_PATH") {
            self.index.sqlite.db_path = Some(path);
        }
    }

    /// Reject configurations the retrieval core cannot run with.
    pub fn validate(&self) -> RecallResult<()> {
        let fail = |msg: String| Err(RecallError::ConfigError(msg));

        match self.embedding.provider.as_str() {
            "ollama" | "api" | "tfidf" => {}
            other => return fail(format!("unknown embedding provider: {other}")),
        }
        if self.embedding.dimensions == 0 {
            return fail("embedding.dimensions must be positive".into());
        }
        if self.embedding.query_cache_capacity == 0 {
            return fail("embedding.query_cache_capacity must be positive".into());
        }

        match self.index.backend.as_str() {
            "sqlite" | "qdrant" => {}
            other => return fail(format!("unknown index backend: {other}")),
        }
        if self.index.collection.trim().is_empty() {
            return fail("index.collection must not be empty".into());
        }
        if self.index.qdrant.url_keys.is_empty() {
            return fail("index.qdrant.url_keys must name at least one key".into());
        }

        if self.retrieval.top_k == 0 {
            return fail("retrieval.top_k must be at least 1".into());
        }
        let threshold = self.retrieval.score_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return fail(format!(
                "retrieval.score_threshold must be within [0, 1], got {threshold}"
            ));
        }

        if self.fusion.self_top_k == 0 || self.fusion.guest_top_k == 0 {
            return fail("fusion stream top_k values must be at least 1".into());
        }
        if self.fusion.self_source == self.fusion.guest_source {
            return fail(format!(
                "fusion.self_source and fusion.guest_source are both {:?}",
                self.fusion.self_source
            ));
        }

        Ok(())
    }
}
