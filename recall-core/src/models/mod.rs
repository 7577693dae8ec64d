//! Data model shared across the workspace.

mod chunk;
mod fused;
mod hit;
mod source;

use std::collections::BTreeMap;

pub use chunk::ChunkRecord;
pub use fused::{Authority, FusedHit, FusedResult, TaggedStreams};
pub use hit::RetrievalHit;
pub use source::SourceTag;

/// Open mapping of string keys to scalar JSON values (e.g. `chunk_index`).
pub type Metadata = BTreeMap<String, serde_json::Value>;
