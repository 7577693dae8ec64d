//! OpenAI-compatible embedding API provider.
//!
//! Sends `{model, input}` with a bearer key and reads `data[].embedding`,
//! ordered by `data[].index`.

use std::time::Duration;

use recall_core::config::defaults;
use recall_core::errors::{EmbeddingError, RecallResult};
use recall_core::traits::IEmbeddingProvider;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cloud API embedding provider.
pub struct ApiProvider {
    client: Client,
    model: String,
    api_key: String,
    endpoint: String,
    dimensions: usize,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}

impl ApiProvider {
    /// Create a new API provider. `endpoint` defaults to the OpenAI embeddings URL.
    pub fn new(
        model: String,
        api_key: String,
        endpoint: Option<String>,
        dimensions: usize,
        timeout: Duration,
    ) -> RecallResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("cannot build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            model,
            api_key,
            endpoint: endpoint.unwrap_or_else(|| defaults::DEFAULT_API_ENDPOINT.to_string()),
            dimensions,
        })
    }

    fn request_embeddings(&self, texts: &[String]) -> RecallResult<Vec<Vec<f32>>> {
        debug!(model = %self.model, count = texts.len(), "API embedding request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&EmbedRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .map_err(|e| EmbeddingError::ProviderUnavailable {
                provider: format!("{}: {e}", self.endpoint),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("API returned {status}: {body}"),
            }
            .into());
        }

        let resp: EmbedResponse = response.json().map_err(|e| EmbeddingError::InferenceFailed {
            reason: format!("JSON parse error: {e}"),
        })?;

        Ok(order_by_index(resp, texts.len())?)
    }
}

fn order_by_index(resp: EmbedResponse, expected: usize) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    if resp.data.len() != expected {
        return Err(EmbeddingError::InferenceFailed {
            reason: format!(
                "API returned {} embeddings for {expected} inputs",
                resp.data.len()
            ),
        });
    }
    let mut data = resp.data;
    data.sort_by_key(|d| d.index);
    Ok(data.into_iter().map(|d| d.embedding).collect())
}

impl IEmbeddingProvider for ApiProvider {
    fn embed(&self, text: &str) -> RecallResult<Vec<f32>> {
        let results = self.request_embeddings(&[text.to_string()])?;
        results.into_iter().next().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty API response".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> RecallResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }
}
