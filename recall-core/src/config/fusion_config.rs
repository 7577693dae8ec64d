use serde::{Deserialize, Serialize};

use super::defaults;

/// Dual-stream fusion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Source tag of the self-authored stream.
    pub self_source: String,
    /// Source tag of the third-party stream.
    pub guest_source: String,
    /// Hits requested from the self-authored stream.
    pub self_top_k: usize,
    /// Hits requested from the third-party stream.
    pub guest_top_k: usize,
    /// Issue both streams concurrently.
    pub parallel_streams: bool,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            self_source: defaults::DEFAULT_SELF_SOURCE.to_string(),
            guest_source: defaults::DEFAULT_GUEST_SOURCE.to_string(),
            self_top_k: defaults::DEFAULT_SELF_TOP_K,
            guest_top_k: defaults::DEFAULT_GUEST_TOP_K,
            parallel_streams: defaults::DEFAULT_PARALLEL_STREAMS,
        }
    }
}
