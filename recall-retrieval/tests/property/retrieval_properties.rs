use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use recall_core::config::{DistanceMetric, EmbeddingConfig};
use recall_core::errors::RecallResult;
use recall_core::models::{Authority, ChunkRecord, Metadata, RetrievalHit, SourceTag};
use recall_core::traits::IEmbeddingProvider;
use recall_embeddings::EmbeddingEngine;
use recall_index::SqliteVectorIndex;
use recall_retrieval::{fuse_streams, RetrievalService};

/// Returns the same vector for every query.
struct FixedProvider(Vec<f32>);

impl IEmbeddingProvider for FixedProvider {
    fn embed(&self, _text: &str) -> RecallResult<Vec<f32>> {
        Ok(self.0.clone())
    }

    fn embed_batch(&self, texts: &[String]) -> RecallResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| self.0.clone()).collect())
    }

    fn dimensions(&self) -> usize {
        self.0.len()
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

fn hit_strategy(source: &'static str) -> impl Strategy<Value = RetrievalHit> {
    // Small url alphabet so streams collide often.
    (prop_oneof![Just(String::new()), "[a-e]"], 0.0f64..=1.0).prop_map(move |(url, score)| {
        RetrievalHit {
            text: format!("{source}:{url}:{score}"),
            source: SourceTag::new(source),
            source_url: url,
            score,
            metadata: Metadata::new(),
        }
    })
}

fn stream(source: &'static str) -> impl Strategy<Value = Vec<RetrievalHit>> {
    proptest::collection::vec(hit_strategy(source), 0..12)
}

fn vector(dims: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-5.0f32..5.0, dims)
}

proptest! {
    #[test]
    fn fused_urls_are_unique_and_sorted(primary in stream("self"), supporting in stream("third-party")) {
        let fused = fuse_streams(primary, supporting);

        let mut seen = HashSet::new();
        for h in fused.iter().filter(|h| !h.source_url().is_empty()) {
            prop_assert!(seen.insert(h.source_url().to_string()), "duplicate url {}", h.source_url());
        }
        prop_assert!(fused.hits.windows(2).all(|w| w[0].score() >= w[1].score()));
    }

    #[test]
    fn fused_keeps_best_score_per_url(primary in stream("self"), supporting in stream("third-party")) {
        let mut best: HashMap<String, f64> = HashMap::new();
        for h in primary.iter().chain(supporting.iter()).filter(|h| !h.source_url.is_empty()) {
            let entry = best.entry(h.source_url.clone()).or_insert(h.score);
            *entry = entry.max(h.score);
        }
        let empty_urls = primary
            .iter()
            .chain(supporting.iter())
            .filter(|h| h.source_url.is_empty())
            .count();

        let fused = fuse_streams(primary, supporting);

        prop_assert_eq!(fused.len(), best.len() + empty_urls);
        for h in fused.iter().filter(|h| !h.source_url().is_empty()) {
            prop_assert_eq!(Some(&h.score()), best.get(h.source_url()));
        }
    }

    #[test]
    fn authority_follows_the_stream(primary in stream("self"), supporting in stream("third-party")) {
        let fused = fuse_streams(primary, supporting);
        for h in fused.iter() {
            let expected = if h.hit.source == "self" {
                Authority::PrimaryBelief
            } else {
                Authority::SupportingExample
            };
            prop_assert_eq!(h.authority, expected);
        }
    }

    #[test]
    fn search_respects_top_k_and_threshold(
        embeddings in proptest::collection::vec(vector(3), 1..25),
        query in vector(3),
        top_k in 1usize..8,
        threshold in 0.0f64..=1.0,
    ) {
        let index = SqliteVectorIndex::open_in_memory("prop", DistanceMetric::L2).unwrap();
        let records: Vec<ChunkRecord> = embeddings
            .into_iter()
            .enumerate()
            .map(|(i, e)| ChunkRecord::new(format!("c{i}"), format!("chunk {i}"), "self", "", e))
            .collect();
        index.upsert(&records).unwrap();

        let config = EmbeddingConfig { dimensions: 3, ..Default::default() };
        let embedder = EmbeddingEngine::with_provider(Box::new(FixedProvider(query)), &config);
        let service = RetrievalService::new(&embedder, &index);

        let hits = service.search("q", top_k, threshold).unwrap();
        prop_assert!(hits.len() <= top_k);
        prop_assert!(hits.iter().all(|h| h.score >= threshold && h.score <= 1.0));
        prop_assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
