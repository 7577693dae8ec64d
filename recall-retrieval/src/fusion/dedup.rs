//! Source-url deduplication.

use std::collections::HashSet;

use recall_core::models::FusedHit;

/// Keep the first hit per non-empty `source_url`. Hits with an empty url are
/// always kept. Order is preserved, so callers sort first.
pub fn dedup_by_source_url(hits: Vec<FusedHit>) -> Vec<FusedHit> {
    let mut seen: HashSet<String> = HashSet::new();
    hits.into_iter()
        .filter(|h| h.source_url().is_empty() || seen.insert(h.source_url().to_string()))
        .collect()
}
