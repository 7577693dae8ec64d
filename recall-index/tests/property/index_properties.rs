use proptest::prelude::*;
use recall_core::config::DistanceMetric;
use recall_core::models::ChunkRecord;
use recall_core::traits::{IVectorIndex, RawScore};
use recall_index::scorer::{normalize, passes_threshold};
use recall_index::SqliteVectorIndex;

fn vector(dims: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-10.0f32..10.0, dims)
}

proptest! {
    #[test]
    fn similarity_is_in_unit_range(d in proptest::num::f64::ANY, s in proptest::num::f64::ANY) {
        let a = normalize(RawScore::Distance(d));
        let b = normalize(RawScore::Similarity(s));
        prop_assert!((0.0..=1.0).contains(&a));
        prop_assert!((0.0..=1.0).contains(&b));
    }

    #[test]
    fn distance_similarity_is_monotone(d1 in 0.0f64..1e6, d2 in 0.0f64..1e6) {
        let (near, far) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        prop_assert!(normalize(RawScore::Distance(near)) >= normalize(RawScore::Distance(far)));
    }

    #[test]
    fn threshold_agrees_with_comparison(s in 0.0f64..=1.0, t in 0.0f64..=1.0) {
        prop_assert_eq!(passes_threshold(s, t), s >= t);
    }

    #[test]
    fn scan_returns_at_most_k_closest_first(
        records in proptest::collection::vec(vector(4), 1..30),
        query in vector(4),
        k in 1usize..10,
    ) {
        let index = SqliteVectorIndex::open_in_memory("prop", DistanceMetric::L2).unwrap();
        let chunks: Vec<ChunkRecord> = records
            .into_iter()
            .enumerate()
            .map(|(i, v)| ChunkRecord::new(format!("c{i}"), "text", "self", "", v))
            .collect();
        index.upsert(&chunks).unwrap();

        let hits = index.search(&query, k, None).unwrap();
        prop_assert!(hits.len() <= k);
        prop_assert_eq!(hits.len(), k.min(chunks.len()));
        let distances: Vec<f64> = hits
            .iter()
            .map(|h| match h.raw_score {
                RawScore::Distance(d) => d,
                RawScore::Similarity(_) => f64::NAN,
            })
            .collect();
        prop_assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }
}
