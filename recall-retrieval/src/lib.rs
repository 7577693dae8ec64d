//! # recall-retrieval
//!
//! Query → embedding → index → normalized, thresholded hits, and the
//! dual-stream fusion that merges a self-authored stream with a third-party
//! stream into one ranked, deduplicated context.
//!
//! ```text
//! RecallContext (config, engine, index, metrics)
//! └── RetrievalService
//!     ├── search              thresholded, unfiltered
//!     ├── search_with_filter  one source, no threshold
//!     └── DualStreamRetriever
//!         ├── authority  stream → label
//!         └── dedup      first hit per source_url
//! ```

pub mod citations;
pub mod context;
pub mod fusion;
pub mod routing;
pub mod service;
pub mod stats;

pub use citations::SourceCitation;
pub use context::RecallContext;
pub use fusion::{fuse_streams, DualStreamRetriever};
pub use routing::{RetrievalOutcome, RetrievalRequest};
pub use service::RetrievalService;
pub use stats::ScoreSummary;
