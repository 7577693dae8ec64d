//! # recall-index
//!
//! Vector index adapters behind `IVectorIndex`, plus the similarity scorer
//! that turns backend-native scores into [0, 1] similarities.
//!
//! ```text
//! factory::open_index(IndexConfig)
//! ├── SqliteVectorIndex  exact scan, L2 / cosine distance
//! └── QdrantIndex        points/query or points/search, cosine similarity
//! ```

pub mod factory;
pub mod payload;
pub mod qdrant;
pub mod scorer;
pub mod sqlite;

pub use factory::open_index;
pub use qdrant::QdrantIndex;
pub use sqlite::SqliteVectorIndex;
