//! Provider registry.
//!
//! The provider is chosen once from `EmbeddingConfig::provider`:
//! - `ollama`: local Ollama server (`/api/embed`)
//! - `api`: OpenAI-compatible HTTP endpoint with a bearer key
//! - `tfidf`: offline hashed term-frequency vectors
//!
//! There is no silent fallback between providers. A query embedded by one
//! model must never be compared against an index built with another.

pub mod api_provider;
pub mod ollama_provider;
pub mod tfidf_fallback;

use std::time::Duration;

pub use api_provider::ApiProvider;
pub use ollama_provider::OllamaProvider;
pub use tfidf_fallback::TfIdfProvider;

use recall_core::config::EmbeddingConfig;
use recall_core::errors::{RecallError, RecallResult};
use recall_core::traits::IEmbeddingProvider;
use tracing::{info, warn};

/// Build the configured provider, boxed.
pub fn create_provider(config: &EmbeddingConfig) -> RecallResult<Box<dyn IEmbeddingProvider>> {
    let timeout = Duration::from_secs(config.timeout_secs);

    match config.provider.as_str() {
        "ollama" => {
            let provider = OllamaProvider::new(
                config.model.clone(),
                config.dimensions,
                config.base_url.clone(),
                timeout,
            )?;
            if !provider.health_check() {
                warn!(
                    provider = "ollama",
                    model = %config.model,
                    "Ollama not reachable at startup; queries will fail until it is"
                );
            }
            info!(provider = "ollama", model = %config.model, "embedding provider ready");
            Ok(Box::new(provider))
        }
        "api" => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                RecallError::ConfigError(
                    "embedding.provider = \"api\" requires an api_key (or EMBEDDING_API_KEY)"
                        .to_string(),
                )
            })?;
            let provider = ApiProvider::new(
                config.model.clone(),
                api_key,
                config.base_url.clone(),
                config.dimensions,
                timeout,
            )?;
            info!(provider = "api", model = %config.model, "embedding provider ready");
            Ok(Box::new(provider))
        }
        "tfidf" => {
            info!(provider = "tfidf", dims = config.dimensions, "using TF-IDF embedding provider");
            Ok(Box::new(TfIdfProvider::new(config.dimensions)))
        }
        other => Err(RecallError::ConfigError(format!(
            "unknown embedding provider: {other}"
        ))),
    }
}
