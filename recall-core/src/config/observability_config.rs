use serde::{Deserialize, Serialize};

use super::defaults;

/// Logging and metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Filter used when `RECALL_LOG` is unset.
    pub log_level: String,
    /// JSON lines instead of human-readable output.
    pub log_json: bool,
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            log_json: defaults::DEFAULT_LOG_JSON,
            metrics_enabled: defaults::DEFAULT_METRICS_ENABLED,
        }
    }
}
