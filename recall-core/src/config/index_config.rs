use serde::{Deserialize, Serialize};

use super::defaults;

/// Vector index configuration. Exactly one backend is active per process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Backend: "sqlite" or "qdrant".
    pub backend: String,
    /// Collection holding the chunk records.
    pub collection: String,
    pub sqlite: SqliteIndexConfig,
    pub qdrant: QdrantIndexConfig,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            backend: defaults::DEFAULT_INDEX_BACKEND.to_string(),
            collection: defaults::DEFAULT_COLLECTION_NAME.to_string(),
            sqlite: SqliteIndexConfig::default(),
            qdrant: QdrantIndexConfig::default(),
        }
    }
}

/// Distance reported by the SQLite store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Euclidean distance.
    L2,
    /// Cosine distance (`1 - cosine similarity`).
    Cosine,
}

/// Local SQLite chunk store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteIndexConfig {
    /// Database file. In-memory when `None`.
    pub db_path: Option<String>,
    pub distance: DistanceMetric,
    pub busy_timeout_ms: u32,
}

impl Default for SqliteIndexConfig {
    fn default() -> Self {
        Self {
            db_path: Some(defaults::DEFAULT_DB_FILENAME.to_string()),
            distance: DistanceMetric::L2,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

/// Which Qdrant search endpoint to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QdrantApi {
    /// `POST /collections/{name}/points/query`.
    Query,
    /// Legacy `POST /collections/{name}/points/search`.
    Search,
    /// Try `query` first; on an unknown endpoint fall back to `search` once
    /// and keep using it.
    Auto,
}

/// Remote Qdrant collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QdrantIndexConfig {
    pub url: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub api: QdrantApi,
    pub timeout_secs: u64,
    /// Payload keys tried in order for the source URL.
    pub url_keys: Vec<String>,
}

impl Default for QdrantIndexConfig {
    fn default() -> Self {
        Self {
            url: defaults::DEFAULT_QDRANT_URL.to_string(),
            api_key: None,
            api: QdrantApi::Auto,
            timeout_secs: defaults::DEFAULT_QDRANT_TIMEOUT_SECS,
            url_keys: vec!["url".to_string(), "source_url".to_string()],
        }
    }
}
