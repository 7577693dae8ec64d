//! Brute-force nearest-neighbor scan over the chunk table.

use rusqlite::{params, Connection, Row};
use tracing::debug;

use recall_core::config::DistanceMetric;
use recall_core::errors::{IndexError, RecallResult};
use recall_core::models::{Metadata, SourceTag};
use recall_core::traits::{ChunkPayload, IndexHit, RawScore};

use super::to_storage_err;
use crate::scorer::cmp_distance_asc;

/// Scan `collection` and return the `k` closest chunks, closest first.
///
/// Reports `Distance` under `metric`. Ties keep insertion order.
pub fn scan(
    conn: &Connection,
    collection: &str,
    vector: &[f32],
    k: usize,
    filter: Option<&SourceTag>,
    metric: DistanceMetric,
) -> RecallResult<Vec<IndexHit>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, text, source, source_url, metadata, embedding
             FROM chunks
             WHERE collection = ?1 AND (?2 IS NULL OR source = ?2)
             ORDER BY rowid",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![collection, filter.map(SourceTag::as_str)], read_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut scored: Vec<(f64, IndexHit)> = Vec::new();
    for row in rows {
        let (id, payload, blob) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let stored = bytes_to_f32_vec(&blob);
        if stored.len() != vector.len() {
            return Err(IndexError::DimensionMismatch {
                collection: collection.to_string(),
                expected: stored.len(),
                actual: vector.len(),
            }
            .into());
        }
        let metadata: Metadata = serde_json::from_str(&payload.3).map_err(|e| {
            IndexError::MalformedPayload {
                point: id.clone(),
                reason: format!("metadata: {e}"),
            }
        })?;
        let distance = match metric {
            DistanceMetric::L2 => l2_distance(vector, &stored),
            DistanceMetric::Cosine => cosine_distance(vector, &stored),
        };
        scored.push((
            distance,
            IndexHit {
                id,
                raw_score: RawScore::Distance(distance),
                payload: ChunkPayload {
                    text: payload.0,
                    source: SourceTag::new(payload.1),
                    source_url: payload.2,
                    metadata,
                },
            },
        ));
    }

    scored.sort_by(|a, b| cmp_distance_asc(a.0, b.0));
    scored.truncate(k);

    debug!(
        collection,
        source = filter.map(SourceTag::as_str),
        top_k = k,
        hits = scored.len(),
        "sqlite scan complete"
    );

    Ok(scored.into_iter().map(|(_, hit)| hit).collect())
}

type RawRow = (String, (String, String, String, String), Vec<u8>);

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        (row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?),
        row.get(5)?,
    ))
}

/// Convert f32 slice to bytes (little-endian).
pub fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert little-endian bytes back to f32s. Trailing partial words are ignored.
pub fn bytes_to_f32_vec(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

/// Euclidean distance.
pub fn l2_distance(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = *x as f64 - *y as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// `1 - cos(a, b)`, in [0, 2]. A zero vector is orthogonal to everything.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    (1.0 - dot / (norm_a * norm_b)).clamp(0.0, 2.0)
}
