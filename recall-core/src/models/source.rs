use std::fmt;

use serde::{Deserialize, Serialize};

/// Source vocabulary tag carried by every chunk (e.g. `"self"`, `"third-party"`,
/// `"linkedin"`, `"youtube_guest"`).
///
/// Kept open-ended: the vocabulary is fixed by ingestion, not by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceTag(String);

impl SourceTag {
    pub const SELF_AUTHORED: &'static str = "self";
    pub const THIRD_PARTY: &'static str = "third-party";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn self_authored() -> Self {
        Self::new(Self::SELF_AUTHORED)
    }

    pub fn third_party() -> Self {
        Self::new(Self::THIRD_PARTY)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SourceTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourceTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for SourceTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl PartialEq<str> for SourceTag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SourceTag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
