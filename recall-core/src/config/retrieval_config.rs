use serde::{Deserialize, Serialize};

use super::defaults;

/// Plain (unfiltered) search defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Default number of hits for `search`.
    pub top_k: usize,
    /// Minimum normalized similarity kept by `search`.
    pub score_threshold: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            score_threshold: defaults::DEFAULT_SCORE_THRESHOLD,
        }
    }
}
