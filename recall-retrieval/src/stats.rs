//! Score distribution summaries for evaluation.

use serde::{Deserialize, Serialize};

use recall_core::constants::SUMMARY_TOP_N;
use recall_core::models::{FusedResult, RetrievalHit};
use recall_index::scorer::cmp_similarity_desc;

/// Count, mean of the best `n`, max, and min of a score list.
///
/// All fields are zero for an empty list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub count: usize,
    pub mean_top_n: f64,
    pub max: f64,
    pub min: f64,
}

impl ScoreSummary {
    /// Summarize with `n` = 3.
    pub fn from_scores(scores: &[f64]) -> Self {
        Self::from_scores_top_n(scores, SUMMARY_TOP_N)
    }

    pub fn from_scores_top_n(scores: &[f64], n: usize) -> Self {
        if scores.is_empty() {
            return Self::default();
        }
        let mut sorted = scores.to_vec();
        sorted.sort_by(|a, b| cmp_similarity_desc(*a, *b));
        let top = &sorted[..n.clamp(1, sorted.len())];
        Self {
            count: sorted.len(),
            mean_top_n: top.iter().sum::<f64>() / top.len() as f64,
            max: sorted[0],
            min: sorted
                .iter()
                .rev()
                .copied()
                .find(|s| !s.is_nan())
                .unwrap_or(sorted[sorted.len() - 1]),
        }
    }

    pub fn from_hits(hits: &[RetrievalHit]) -> Self {
        Self::from_scores(&hits.iter().map(|h| h.score).collect::<Vec<_>>())
    }

    pub fn from_fused(result: &FusedResult) -> Self {
        Self::from_scores(&result.iter().map(|h| h.score()).collect::<Vec<_>>())
    }
}
