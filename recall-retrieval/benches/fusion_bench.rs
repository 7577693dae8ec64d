use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use recall_core::config::{DistanceMetric, EmbeddingConfig, FusionConfig};
use recall_core::models::{ChunkRecord, Metadata, RetrievalHit, SourceTag};
use recall_embeddings::EmbeddingEngine;
use recall_index::SqliteVectorIndex;
use recall_retrieval::{fuse_streams, DualStreamRetriever, RetrievalService};

const DIMS: usize = 128;

fn hits(source: &str, n: usize) -> Vec<RetrievalHit> {
    (0..n)
        .map(|i| RetrievalHit {
            text: format!("{source} chunk {i}"),
            source: SourceTag::new(source),
            source_url: format!("https://example.com/{}", i % (n / 2 + 1)),
            score: 1.0 / (1.0 + i as f64),
            metadata: Metadata::new(),
        })
        .collect()
}

fn bench_fuse_streams(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuse_streams");
    for n in [3usize, 20, 200] {
        let primary = hits("self", n);
        let supporting = hits("third-party", n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| fuse_streams(primary.clone(), supporting.clone()))
        });
    }
    group.finish();
}

fn bench_dual_stream(c: &mut Criterion) {
    let embedder = EmbeddingEngine::new(&EmbeddingConfig {
        provider: "tfidf".to_string(),
        dimensions: DIMS,
        ..Default::default()
    })
    .unwrap();

    let index = SqliteVectorIndex::open_in_memory("bench", DistanceMetric::L2).unwrap();
    let records: Vec<ChunkRecord> = (0..500)
        .map(|i| {
            let text = format!("note {i} about hiring retention pricing and growth loop {}", i % 7);
            let source = if i % 3 == 0 { "third-party" } else { "self" };
            let embedding = embedder.embed_query(&text).unwrap();
            ChunkRecord::new(format!("c{i}"), text, source, format!("https://example.com/{i}"), embedding)
        })
        .collect();
    index.upsert(&records).unwrap();
    embedder.clear_cache();

    let service = RetrievalService::new(&embedder, &index);
    for parallel in [false, true] {
        let config = FusionConfig {
            parallel_streams: parallel,
            ..Default::default()
        };
        let retriever = DualStreamRetriever::new(&service, &config);
        let name = if parallel { "dual_stream_parallel" } else { "dual_stream_sequential" };
        c.bench_function(name, |b| {
            b.iter(|| retriever.retrieve("how do you think about retention").unwrap())
        });
    }
}

criterion_group!(benches, bench_fuse_streams, bench_dual_stream);
criterion_main!(benches);
