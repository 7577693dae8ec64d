use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;
use recall_embeddings::cache::{normalize_query, CacheOutcome, QueryEmbeddingCache};

proptest! {
    #[test]
    fn normalize_is_idempotent(s in ".{0,200}") {
        let once = normalize_query(&s);
        prop_assert_eq!(normalize_query(&once), once.clone());
        prop_assert!(!once.starts_with(' ') && !once.ends_with(' '));
        prop_assert!(!once.contains("  "));
    }

    #[test]
    fn padding_does_not_change_the_key(s in "[a-z ]{1,60}", pad in "[ \t\n]{0,5}") {
        let cache = QueryEmbeddingCache::new(1_000, None);
        cache.get_or_compute(&s, |_| Ok(vec![1.0])).unwrap();
        let padded = format!("{pad}{s}{pad}");
        let (_, outcome) = cache.get_or_compute(&padded, |_| Ok(vec![2.0])).unwrap();
        prop_assert_eq!(outcome, CacheOutcome::Hit);
    }

    #[test]
    fn repeated_lookups_compute_once(s in ".{1,80}", repeats in 1usize..10) {
        let cache = QueryEmbeddingCache::new(1_000, None);
        let calls = AtomicUsize::new(0);
        let mut first = None;
        for _ in 0..repeats {
            let (v, _) = cache
                .get_or_compute(&s, |q| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![q.len() as f32, 0.5])
                })
                .unwrap();
            match &first {
                None => first = Some(v),
                Some(prev) => prop_assert_eq!(prev, &v),
            }
        }
        prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn entry_count_never_exceeds_capacity(cap in 1u64..32, n in 0usize..200) {
        let cache = QueryEmbeddingCache::new(cap, None);
        for i in 0..n {
            cache.get_or_compute(&format!("q{i}"), |_| Ok(vec![i as f32])).unwrap();
        }
        prop_assert!(cache.len() <= cap);
    }
}
