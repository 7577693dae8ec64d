//! Request and response bodies for the Qdrant points endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `must: [{key: "source", match: {value}}]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    pub must: Vec<FieldCondition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldCondition {
    pub key: String,
    #[serde(rename = "match")]
    pub matches: MatchValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchValue {
    pub value: String,
}

impl Filter {
    pub fn source_equals(source: &str) -> Self {
        Self {
            must: vec![FieldCondition {
                key: "source".to_string(),
                matches: MatchValue {
                    value: source.to_string(),
                },
            }],
        }
    }
}

/// `POST /collections/{c}/points/query`.
#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub query: &'a [f32],
    pub limit: usize,
    pub with_payload: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

/// `POST /collections/{c}/points/search`.
#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub vector: &'a [f32],
    pub limit: usize,
    pub with_payload: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub result: QueryResult,
}

#[derive(Debug, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub points: Vec<ScoredPoint>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub result: Vec<ScoredPoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoredPoint {
    /// Unsigned integer or UUID string.
    pub id: Value,
    pub score: f64,
    #[serde(default)]
    pub payload: Option<Map<String, Value>>,
}

impl ScoredPoint {
    pub fn id_string(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
