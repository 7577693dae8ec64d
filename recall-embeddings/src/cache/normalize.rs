//! Query normalization and cache keys.

/// Trim the query and fold every interior whitespace run into one space.
///
/// Casing is preserved.
pub fn normalize_query(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// blake3 hex digest of the given text.
pub fn content_hash(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}
