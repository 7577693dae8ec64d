//! Backend score → similarity in [0, 1].
//!
//! Distances map through `1 / (1 + d)`: monotone decreasing, `sim(0) = 1`,
//! tending to 0. This is a ranking transform, not a calibrated probability.

use std::cmp::Ordering;

use recall_core::traits::RawScore;

/// Normalize a backend-native score into [0, 1]. NaN maps to 0.
pub fn normalize(raw: RawScore) -> f64 {
    match raw {
        RawScore::Similarity(s) if s.is_nan() => 0.0,
        RawScore::Similarity(s) => s.clamp(0.0, 1.0),
        RawScore::Distance(d) if d.is_nan() => 0.0,
        RawScore::Distance(d) => 1.0 / (1.0 + d.max(0.0)),
    }
}

/// Whether a normalized similarity survives `threshold`.
pub fn passes_threshold(similarity: f64, threshold: f64) -> bool {
    similarity >= threshold
}

/// Best-first order on similarities. Total: NaN sorts after every number.
pub fn cmp_similarity_desc(a: f64, b: f64) -> Ordering {
    let key = |s: f64| if s.is_nan() { f64::NEG_INFINITY } else { s };
    key(b).total_cmp(&key(a))
}

/// Closest-first order on distances. Total: NaN sorts after every number.
pub fn cmp_distance_asc(a: f64, b: f64) -> Ordering {
    let key = |d: f64| if d.is_nan() { f64::INFINITY } else { d };
    key(a).total_cmp(&key(b))
}
