//! Build the configured `IVectorIndex`.

use std::path::Path;

use tracing::info;

use recall_core::config::IndexConfig;
use recall_core::errors::{RecallError, RecallResult};
use recall_core::traits::IVectorIndex;

use crate::qdrant::QdrantIndex;
use crate::sqlite::SqliteVectorIndex;

/// Open the backend named by `config.backend`.
///
/// SQLite with no `db_path` opens an in-memory store.
pub fn open_index(config: &IndexConfig) -> RecallResult<Box<dyn IVectorIndex>> {
    let index: Box<dyn IVectorIndex> = match config.backend.as_str() {
        "sqlite" => match &config.sqlite.db_path {
            Some(path) => Box::new(SqliteVectorIndex::open(
                Path::new(path),
                &config.collection,
                &config.sqlite,
            )?),
            None => Box::new(SqliteVectorIndex::open_in_memory(
                &config.collection,
                config.sqlite.distance,
            )?),
        },
        "qdrant" => Box::new(QdrantIndex::new(&config.collection, &config.qdrant)?),
        other => {
            return Err(RecallError::ConfigError(format!(
                "unknown index backend: {other}"
            )))
        }
    };

    info!(backend = index.name(), collection = index.collection(), "vector index ready");
    Ok(index)
}
