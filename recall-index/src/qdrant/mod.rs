//! Qdrant REST adapter.

mod client;
pub mod wire;

pub use client::QdrantIndex;
