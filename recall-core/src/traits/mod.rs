mod embedding;
mod index;

pub use embedding::IEmbeddingProvider;
pub use index::{ChunkPayload, IVectorIndex, IndexHit, RawScore};
