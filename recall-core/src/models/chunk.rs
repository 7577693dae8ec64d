use serde::{Deserialize, Serialize};

use super::{Metadata, SourceTag};
use crate::errors::IndexError;

/// Immutable unit of indexed text, written at ingestion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: String,
    pub text: String,
    pub source: SourceTag,
    /// May be empty.
    #[serde(default)]
    pub source_url: String,
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl ChunkRecord {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        source: impl Into<SourceTag>,
        source_url: impl Into<String>,
        embedding: Vec<f32>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            source: source.into(),
            source_url: source_url.into(),
            embedding,
            metadata: Metadata::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Check the record is indexable: non-empty id and text, finite embedding.
    pub fn validate(&self) -> Result<(), IndexError> {
        let malformed = |reason: &str| IndexError::MalformedPayload {
            point: self.id.clone(),
            reason: reason.to_string(),
        };
        if self.id.trim().is_empty() {
            return Err(malformed("empty id"));
        }
        if self.text.trim().is_empty() {
            return Err(malformed("empty text"));
        }
        if self.embedding.is_empty() {
            return Err(malformed("empty embedding"));
        }
        if self.embedding.iter().any(|x| !x.is_finite()) {
            return Err(malformed("non-finite embedding component"));
        }
        Ok(())
    }
}
