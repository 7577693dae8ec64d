//! Table layout and versioned migrations, tracked in `PRAGMA user_version`.

use rusqlite::Connection;
use tracing::info;

use recall_core::errors::RecallResult;

use super::to_storage_err;

pub const SCHEMA_VERSION: u32 = 1;

const V001_CHUNKS: &str = "
    CREATE TABLE IF NOT EXISTS collections (
        name        TEXT PRIMARY KEY,
        dimensions  INTEGER NOT NULL CHECK (dimensions > 0)
    );

    CREATE TABLE IF NOT EXISTS chunks (
        collection  TEXT NOT NULL REFERENCES collections(name) ON DELETE CASCADE,
        id          TEXT NOT NULL,
        text        TEXT NOT NULL,
        source      TEXT NOT NULL,
        source_url  TEXT NOT NULL DEFAULT '',
        metadata    TEXT NOT NULL DEFAULT '{}',
        embedding   BLOB NOT NULL,
        PRIMARY KEY (collection, id)
    );

    CREATE INDEX IF NOT EXISTS idx_chunks_source ON chunks(collection, source);
";

/// Bring the database up to `SCHEMA_VERSION`.
pub fn run_migrations(conn: &Connection) -> RecallResult<()> {
    let current: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    if current < 1 {
        conn.execute_batch(V001_CHUNKS)
            .map_err(|e| to_storage_err(format!("migration v001: {e}")))?;
        conn.pragma_update(None, "user_version", 1)
            .map_err(|e| to_storage_err(e.to_string()))?;
        info!(version = 1, "applied chunk store migration");
    }

    Ok(())
}
