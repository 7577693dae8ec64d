//! `SqliteVectorIndex`: one collection in a SQLite chunk store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use recall_core::config::{DistanceMetric, SqliteIndexConfig};
use recall_core::errors::{IndexError, RecallResult};
use recall_core::models::{ChunkRecord, SourceTag};
use recall_core::traits::{IVectorIndex, IndexHit};

use super::pragmas::apply_pragmas;
use super::schema::run_migrations;
use super::search::{f32_vec_to_bytes, scan};
use super::to_storage_err;

/// Exact-scan vector index over one collection of a SQLite chunk store.
///
/// Reports distances. A collection with no rows is `IndexError::Unavailable`.
pub struct SqliteVectorIndex {
    conn: Mutex<Connection>,
    collection: String,
    metric: DistanceMetric,
}

impl SqliteVectorIndex {
    /// Open (or create) a file-backed store.
    pub fn open(path: &Path, collection: &str, config: &SqliteIndexConfig) -> RecallResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, config.busy_timeout_ms)?;
        run_migrations(&conn)?;
        info!(
            path = %path.display(),
            collection,
            metric = ?config.distance,
            "sqlite index opened"
        );
        Ok(Self {
            conn: Mutex::new(conn),
            collection: collection.to_string(),
            metric: config.distance,
        })
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory(collection: &str, metric: DistanceMetric) -> RecallResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, recall_core::config::defaults::DEFAULT_BUSY_TIMEOUT_MS)?;
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            collection: collection.to_string(),
            metric,
        })
    }

    fn lock(&self) -> RecallResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| to_storage_err("connection mutex poisoned").into())
    }

    /// Insert or replace chunk records, atomically.
    ///
    /// The first write fixes the collection's dimension; later records must match it.
    pub fn upsert(&self, records: &[ChunkRecord]) -> RecallResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }
        for record in records {
            record.validate()?;
        }

        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| to_storage_err(e.to_string()))?;

        let dims = match collection_dimensions(&tx, &self.collection)? {
            Some(dims) => dims,
            None => {
                let dims = records[0].embedding.len();
                tx.execute(
                    "INSERT INTO collections (name, dimensions) VALUES (?1, ?2)",
                    params![self.collection, dims as i64],
                )
                .map_err(|e| to_storage_err(e.to_string()))?;
                dims
            }
        };

        for record in records {
            if record.embedding.len() != dims {
                return Err(IndexError::DimensionMismatch {
                    collection: self.collection.clone(),
                    expected: dims,
                    actual: record.embedding.len(),
                }
                .into());
            }
            let metadata = serde_json::to_string(&record.metadata)?;
            tx.execute(
                "INSERT INTO chunks (collection, id, text, source, source_url, metadata, embedding)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(collection, id) DO UPDATE SET
                    text = excluded.text,
                    source = excluded.source,
                    source_url = excluded.source_url,
                    metadata = excluded.metadata,
                    embedding = excluded.embedding",
                params![
                    self.collection,
                    record.id,
                    record.text,
                    record.source.as_str(),
                    record.source_url,
                    metadata,
                    f32_vec_to_bytes(&record.embedding),
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        }

        tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
        debug!(collection = %self.collection, count = records.len(), "chunks upserted");
        Ok(records.len())
    }

    /// Number of chunks in the collection.
    pub fn count(&self) -> RecallResult<u64> {
        let conn = self.lock()?;
        count_chunks(&conn, &self.collection)
    }

    /// Embedding dimension fixed for the collection, if any record was ever written.
    pub fn dimensions(&self) -> RecallResult<Option<usize>> {
        let conn = self.lock()?;
        collection_dimensions(&conn, &self.collection)
    }

    /// Delete every chunk and the dimension record. Used before a rebuild.
    pub fn drop_collection(&self) -> RecallResult<u64> {
        let conn = self.lock()?;
        let removed = conn
            .execute(
                "DELETE FROM chunks WHERE collection = ?1",
                params![self.collection],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        conn.execute(
            "DELETE FROM collections WHERE name = ?1",
            params![self.collection],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        info!(collection = %self.collection, removed, "collection dropped");
        Ok(removed as u64)
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }
}

fn count_chunks(conn: &Connection, collection: &str) -> RecallResult<u64> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM chunks WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as u64)
}

fn collection_dimensions(conn: &Connection, collection: &str) -> RecallResult<Option<usize>> {
    let dims: Option<i64> = conn
        .query_row(
            "SELECT dimensions FROM collections WHERE name = ?1",
            params![collection],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(dims.map(|d| d as usize))
}

impl IVectorIndex for SqliteVectorIndex {
    fn search(
        &self,
        vector: &[f32],
        k: usize,
        filter: Option<&SourceTag>,
    ) -> RecallResult<Vec<IndexHit>> {
        if k == 0 {
            return Err(IndexError::InvalidArgument {
                reason: "k must be at least 1".to_string(),
            }
            .into());
        }

        let conn = self.lock()?;
        if count_chunks(&conn, &self.collection)? == 0 {
            debug!(collection = %self.collection, "collection is empty or missing");
            return Err(IndexError::Unavailable {
                collection: self.collection.clone(),
            }
            .into());
        }

        scan(&conn, &self.collection, vector, k, filter, self.metric)
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
