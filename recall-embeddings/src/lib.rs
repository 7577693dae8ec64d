//! # recall-embeddings
//!
//! Query embedding with a bounded, content-hash keyed cache.
//! Supports Ollama, OpenAI-compatible APIs, and a local TF-IDF provider.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingEngine
//! ├── Provider (chosen once from config)
//! │   ├── OllamaProvider (local server)
//! │   ├── ApiProvider (OpenAI-compatible)
//! │   └── TfIdfProvider (offline, deterministic)
//! └── QueryEmbeddingCache (moka, blake3 keys)
//!     └── normalize (whitespace folding)
//! ```

pub mod cache;
pub mod engine;
pub mod providers;

pub use cache::{CacheOutcome, CacheStats, QueryEmbeddingCache};
pub use engine::EmbeddingEngine;
pub use providers::{ApiProvider, OllamaProvider, TfIdfProvider};
