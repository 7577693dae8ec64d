/// Authority label for hits from the self-authored stream.
pub const AUTHORITY_PRIMARY_LABEL: &str = "primary belief";

/// Authority label for hits from the third-party stream.
pub const AUTHORITY_SUPPORTING_LABEL: &str = "supporting example";

/// Source recorded when a payload carries no `source` field.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Number of leading hits averaged by score summaries.
pub const SUMMARY_TOP_N: usize = 3;
