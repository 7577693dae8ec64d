//! RecallContext lifecycle.

mod common;

use common::*;
use recall_core::config::RecallConfig;
use recall_core::errors::RecallError;
use recall_core::models::{ChunkRecord, SourceTag};
use recall_core::traits::IEmbeddingProvider;
use recall_index::SqliteVectorIndex;
use recall_retrieval::{RecallContext, RetrievalRequest, ScoreSummary};

const Q: &str = "What is retention?";

fn in_memory_tfidf_config() -> RecallConfig {
    let mut config = RecallConfig::default();
    config.embedding.provider = "tfidf".to_string();
    config.embedding.dimensions = 512;
    config.index.sqlite.db_path = None;
    config
}

#[test]
fn open_with_tfidf_and_empty_store_returns_nothing() {
    let ctx = RecallContext::open(in_memory_tfidf_config()).unwrap();
    assert_eq!(ctx.embedder().provider_name(), "tfidf");
    assert_eq!(ctx.index().name(), "sqlite");

    assert!(ctx.search(Q).unwrap().is_empty());
    assert!(ctx.retrieve_fused(Q).unwrap().is_empty());

    let metrics = ctx.close();
    assert!(metrics.retrieval.degraded >= 1);
}

#[test]
fn open_rejects_invalid_config() {
    let mut config = in_memory_tfidf_config();
    config.retrieval.top_k = 0;
    assert!(matches!(
        RecallContext::open(config),
        Err(RecallError::ConfigError(_))
    ));

    let mut config = in_memory_tfidf_config();
    config.embedding.provider = "word2vec".to_string();
    assert!(matches!(
        RecallContext::open(config),
        Err(RecallError::ConfigError(_))
    ));
}

#[test]
fn tfidf_context_finds_lexically_similar_chunks() {
    let config = in_memory_tfidf_config();
    let embedder = recall_embeddings::EmbeddingEngine::new(&config.embedding).unwrap();

    let texts = [
        ("c0", "self", "Retention is the only metric that matters early."),
        ("c1", "self", "Hiring slowly saved us twice."),
        ("c2", "third-party", "Our retention curve flattened at week six."),
    ];
    let records: Vec<ChunkRecord> = texts
        .iter()
        .map(|(id, source, text)| {
            let embedding = embedder.embed(text).unwrap();
            ChunkRecord::new(*id, *text, *source, format!("https://x/{id}"), embedding)
        })
        .collect();
    let index = SqliteVectorIndex::open_in_memory(
        &config.index.collection,
        config.index.sqlite.distance,
    )
    .unwrap();
    index.upsert(&records).unwrap();

    let ctx = RecallContext::from_parts(config, embedder, Box::new(index));
    let hits = ctx
        .search_with_filter("retention", &SourceTag::self_authored())
        .unwrap();
    assert_eq!(hits[0].text, texts[0].2);
    assert!(hits.iter().all(|h| h.source == "self"));
}

#[test]
fn metrics_and_cache_are_tracked_per_context() {
    let mut config = RecallConfig::default();
    config.embedding.dimensions = 2;
    let embedder = engine(LookupProvider::new(2).with(Q, vec![1.0, 0.0]));
    let ctx = RecallContext::from_parts(config, embedder, Box::new(index_with(&mixed_records())));

    let hits = ctx.search(Q).unwrap();
    ctx.search(Q).unwrap();
    ctx.retrieve_fused(Q).unwrap();

    let summary = ScoreSummary::from_hits(&hits);
    assert_eq!(summary.count, hits.len());
    assert!((summary.max - 1.0).abs() < 1e-12);

    let cache = ctx.cache_stats();
    assert_eq!(cache.misses, 1);
    assert_eq!(cache.hits, 2);

    let snapshot = ctx.metrics_snapshot();
    assert_eq!(snapshot.retrieval.fused_queries, 1);
    assert_eq!(snapshot.embedding.cache_hits, 2);

    let closed = ctx.close();
    assert_eq!(closed.retrieval.fused_queries, 1);
}

#[test]
fn metrics_can_be_disabled() {
    let mut config = RecallConfig::default();
    config.observability.metrics_enabled = false;
    let embedder = engine(LookupProvider::new(2).with(Q, vec![1.0, 0.0]));
    let ctx = RecallContext::from_parts(config, embedder, Box::new(index_with(&mixed_records())));

    ctx.search(Q).unwrap();
    assert_eq!(ctx.metrics_snapshot().retrieval.queries, 0);
}

#[test]
fn route_through_context_uses_configured_sources() {
    let mut config = RecallConfig::default();
    config.fusion.guest_source = "linkedin".to_string();
    let embedder = engine(LookupProvider::new(2).with(Q, vec![1.0, 0.0]));
    let ctx = RecallContext::from_parts(config, embedder, Box::new(index_with(&mixed_records())));

    let outcome = ctx.route(&RetrievalRequest::fused(Q)).unwrap();
    let sources: Vec<&str> = outcome.hits().iter().map(|h| h.source.as_str()).collect();
    assert_eq!(sources, ["self", "linkedin", "self", "linkedin"]);
}
