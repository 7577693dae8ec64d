//! Payload → `ChunkPayload` for backends that store chunks as JSON objects.

use recall_core::constants::UNKNOWN_SOURCE;
use recall_core::errors::IndexError;
use recall_core::models::{Metadata, SourceTag};
use recall_core::traits::ChunkPayload;
use serde_json::{Map, Value};

/// Rebuild a chunk view from a JSON payload.
///
/// `text` is required. `source` defaults to `"unknown"`. The URL is taken from
/// the first of `url_keys` holding a string, else empty. `metadata` must be an
/// object when present.
pub fn parse_payload(
    point: &str,
    payload: Option<&Map<String, Value>>,
    url_keys: &[String],
) -> Result<ChunkPayload, IndexError> {
    let malformed = |reason: &str| IndexError::MalformedPayload {
        point: point.to_string(),
        reason: reason.to_string(),
    };

    let payload = payload.ok_or_else(|| malformed("missing payload"))?;

    let text = payload
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing string field `text`"))?
        .to_string();

    let source = payload
        .get("source")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_SOURCE);

    let source_url = url_keys
        .iter()
        .find_map(|key| payload.get(key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string();

    let metadata: Metadata = match payload.get("metadata") {
        None | Some(Value::Null) => Metadata::new(),
        Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        Some(_) => return Err(malformed("`metadata` is not an object")),
    };

    Ok(ChunkPayload {
        text,
        source: SourceTag::new(source),
        source_url,
        metadata,
    })
}
