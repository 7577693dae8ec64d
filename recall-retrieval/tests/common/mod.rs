//! Shared helpers for recall-retrieval integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use recall_core::config::{DistanceMetric, EmbeddingConfig};
use recall_core::errors::{EmbeddingError, IndexError, RecallResult};
use recall_core::models::{ChunkRecord, SourceTag};
use recall_core::traits::{IEmbeddingProvider, IVectorIndex, IndexHit};
use recall_embeddings::EmbeddingEngine;
use recall_index::SqliteVectorIndex;

/// Provider returning hand-picked vectors per (normalized) query.
pub struct LookupProvider {
    vectors: HashMap<String, Vec<f32>>,
    dims: usize,
    calls: Arc<AtomicUsize>,
}

impl LookupProvider {
    pub fn new(dims: usize) -> Self {
        Self {
            vectors: HashMap::new(),
            dims,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with(mut self, query: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(query.to_string(), vector);
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl IEmbeddingProvider for LookupProvider {
    fn embed(&self, text: &str) -> RecallResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.vectors.get(text).cloned().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: format!("no vector for {text:?}"),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> RecallResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn name(&self) -> &str {
        "lookup"
    }
}

pub fn engine(provider: LookupProvider) -> EmbeddingEngine {
    let config = EmbeddingConfig {
        dimensions: provider.dims,
        ..Default::default()
    };
    EmbeddingEngine::with_provider(Box::new(provider), &config)
}

pub fn chunk(id: &str, source: &str, url: &str, embedding: Vec<f32>) -> ChunkRecord {
    ChunkRecord::new(id, format!("text of {id}"), source, url, embedding)
}

pub fn index_with(records: &[ChunkRecord]) -> SqliteVectorIndex {
    let index = SqliteVectorIndex::open_in_memory("persona_chunks", DistanceMetric::L2).unwrap();
    if !records.is_empty() {
        index.upsert(records).unwrap();
    }
    index
}

/// Two self chunks and five third-party chunks. Query vector is `[1, 0]`.
pub fn mixed_records() -> Vec<ChunkRecord> {
    vec![
        chunk("s0", "self", "https://l/0", vec![1.0, 0.0]),
        chunk("s1", "self", "https://l/1", vec![0.0, 1.0]),
        chunk("g0", "third-party", "https://y/0", vec![2.0, 0.0]),
        chunk("g1", "third-party", "https://y/1", vec![0.0, 2.0]),
        chunk("g2", "linkedin", "https://in/2", vec![1.0, 1.0]),
        chunk("g3", "linkedin", "https://in/3", vec![3.0, 0.0]),
        chunk("g4", "youtube", "https://yt/4", vec![0.0, 3.0]),
    ]
}

/// Index that always fails with the given error.
pub struct BrokenIndex {
    pub unavailable: bool,
}

impl IVectorIndex for BrokenIndex {
    fn search(
        &self,
        _vector: &[f32],
        _k: usize,
        _filter: Option<&SourceTag>,
    ) -> RecallResult<Vec<IndexHit>> {
        if self.unavailable {
            Err(IndexError::Unavailable {
                collection: "persona_chunks".to_string(),
            }
            .into())
        } else {
            Err(IndexError::BackendCall {
                backend: "qdrant".to_string(),
                reason: "HTTP 500".to_string(),
            }
            .into())
        }
    }

    fn collection(&self) -> &str {
        "persona_chunks"
    }

    fn name(&self) -> &str {
        "broken"
    }
}

pub fn ids(hits: &[recall_core::models::RetrievalHit]) -> Vec<String> {
    hits.iter()
        .map(|h| h.text.trim_start_matches("text of ").to_string())
        .collect()
}
