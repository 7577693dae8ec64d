//! Fused vs single-source retrieval.

use serde::{Deserialize, Serialize};

use recall_core::config::{FusionConfig, RetrievalConfig};
use recall_core::errors::RecallResult;
use recall_core::models::{FusedResult, RetrievalHit, SourceTag};

use crate::fusion::DualStreamRetriever;
use crate::service::RetrievalService;

/// One retrieval call as the prompt-assembly layer issues it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalRequest {
    pub query: String,
    /// Restrict to one source and skip fusion.
    #[serde(default)]
    pub source_override: Option<SourceTag>,
    /// Hit count for the single-source path. `retrieval.top_k` when `None`.
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl RetrievalRequest {
    pub fn fused(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            source_override: None,
            top_k: None,
        }
    }

    pub fn single_source(query: impl Into<String>, source: impl Into<SourceTag>) -> Self {
        Self {
            query: query.into(),
            source_override: Some(source.into()),
            top_k: None,
        }
    }
}

/// What a [`RetrievalRequest`] produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RetrievalOutcome {
    Fused(FusedResult),
    SingleSource {
        source: SourceTag,
        hits: Vec<RetrievalHit>,
    },
}

impl RetrievalOutcome {
    /// True when nothing was found. Callers substitute their fallback message.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Fused(fused) => fused.is_empty(),
            Self::SingleSource { hits, .. } => hits.is_empty(),
        }
    }

    /// Hits in final order, without authority labels.
    pub fn hits(&self) -> Vec<&RetrievalHit> {
        match self {
            Self::Fused(fused) => fused.iter().map(|h| &h.hit).collect(),
            Self::SingleSource { hits, .. } => hits.iter().collect(),
        }
    }
}

/// Dispatch `request` to fusion or to a single filtered search.
pub fn route(
    service: &RetrievalService<'_>,
    fusion: &FusionConfig,
    retrieval: &RetrievalConfig,
    request: &RetrievalRequest,
) -> RecallResult<RetrievalOutcome> {
    match &request.source_override {
        Some(source) => {
            let top_k = request.top_k.unwrap_or(retrieval.top_k);
            let hits = service.search_with_filter(&request.query, source, top_k)?;
            Ok(RetrievalOutcome::SingleSource {
                source: source.clone(),
                hits,
            })
        }
        None => DualStreamRetriever::new(service, fusion)
            .retrieve(&request.query)
            .map(RetrievalOutcome::Fused),
    }
}
