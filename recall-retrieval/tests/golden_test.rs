//! Golden fusion and retrieval scenarios from `test-fixtures/golden`.

mod common;

use common::*;
use recall_core::config::DistanceMetric;
use recall_core::models::{ChunkRecord, Metadata, RetrievalHit, SourceTag};
use recall_index::SqliteVectorIndex;
use recall_retrieval::{citations, fuse_streams, RetrievalService};
use test_fixtures::{load_fixture, list_scenarios, FusionScenario, RetrievalScenario, StreamHit};

fn to_hit(h: &StreamHit) -> RetrievalHit {
    RetrievalHit {
        text: h.text.clone(),
        source: SourceTag::new(h.source.as_str()),
        source_url: h.source_url.clone(),
        score: h.score,
        metadata: Metadata::new(),
    }
}

#[test]
fn golden_fusion_scenarios() {
    let scenarios = list_scenarios("golden/fusion");
    assert!(!scenarios.is_empty());

    for path in scenarios {
        let s: FusionScenario = load_fixture(&path);
        let fused = fuse_streams(
            s.primary.iter().map(to_hit).collect(),
            s.supporting.iter().map(to_hit).collect(),
        );

        let actual: Vec<(String, f64, String)> = fused
            .iter()
            .map(|h| (h.source_url().to_string(), h.score(), h.authority.to_string()))
            .collect();
        let expected: Vec<(String, f64, String)> = s
            .expected
            .iter()
            .map(|e| (e.source_url.clone(), e.score, e.authority.clone()))
            .collect();
        assert_eq!(actual, expected, "scenario {}", s.name);

        let cited = citations::from_fused(&fused);
        assert!(cited.iter().all(|c| !c.url.is_empty()), "scenario {}", s.name);
    }
}

#[test]
fn golden_retrieval_scenarios() {
    let scenarios = list_scenarios("golden/retrieval");
    assert!(!scenarios.is_empty());

    for path in scenarios {
        let s: RetrievalScenario = load_fixture(&path);
        let metric = match s.distance.as_str() {
            "cosine" => DistanceMetric::Cosine,
            _ => DistanceMetric::L2,
        };
        let dims = s.chunks[0].embedding.len();

        let records: Vec<ChunkRecord> = s
            .chunks
            .iter()
            .map(|c| {
                ChunkRecord::new(
                    c.id.as_str(),
                    c.text.as_str(),
                    c.source.as_str(),
                    c.source_url.as_str(),
                    c.embedding.clone(),
                )
                .with_metadata("id", serde_json::json!(c.id))
            })
            .collect();
        let index = SqliteVectorIndex::open_in_memory("golden", metric).unwrap();
        index.upsert(&records).unwrap();

        let provider = s
            .queries
            .iter()
            .fold(LookupProvider::new(dims), |p, q| p.with(&q.query, q.vector.clone()));
        let embedder = engine(provider);
        let service = RetrievalService::new(&embedder, &index);

        for q in &s.queries {
            let hits = match (&q.source, q.threshold) {
                (Some(source), _) => service
                    .search_with_filter(&q.query, &SourceTag::new(source.as_str()), q.top_k)
                    .unwrap(),
                (None, Some(threshold)) => service.search(&q.query, q.top_k, threshold).unwrap(),
                (None, None) => service.search(&q.query, q.top_k, 0.0).unwrap(),
            };
            let got: Vec<&str> = hits
                .iter()
                .filter_map(|h| h.metadata.get("id").and_then(|v| v.as_str()))
                .collect();
            assert_eq!(got, q.expected_ids, "{} / {:?} top_k={}", s.name, q.query, q.top_k);
        }
    }
}
