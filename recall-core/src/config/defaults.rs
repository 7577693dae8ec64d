// Single source of truth for all default values.

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "ollama";
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384; // all-MiniLM-L6-v2
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_API_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";
pub const DEFAULT_QUERY_CACHE_CAPACITY: u64 = 10_000;
pub const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 30;

// --- Index ---
pub const DEFAULT_INDEX_BACKEND: &str = "sqlite";
pub const DEFAULT_COLLECTION_NAME: &str = "persona_chunks";
pub const DEFAULT_DB_FILENAME: &str = "recall.db";
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6333";
pub const DEFAULT_QDRANT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.3;

// --- Fusion ---
pub const DEFAULT_SELF_SOURCE: &str = "self";
pub const DEFAULT_GUEST_SOURCE: &str = "third-party";
pub const DEFAULT_SELF_TOP_K: usize = 3;
pub const DEFAULT_GUEST_TOP_K: usize = 3;
pub const DEFAULT_PARALLEL_STREAMS: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = true;
pub const DEFAULT_METRICS_ENABLED: bool = true;
