//! `QdrantIndex`: blocking REST client for one collection.
//!
//! Two call shapes are supported: `points/query` (current) and
//! `points/search` (legacy). In `auto` mode the first search tries `query`;
//! if the server answers 404 for an existing collection the adapter falls
//! back to `search` once and keeps using it.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use recall_core::config::{QdrantApi, QdrantIndexConfig};
use recall_core::errors::{IndexError, RecallResult};
use recall_core::models::SourceTag;
use recall_core::traits::{IVectorIndex, IndexHit, RawScore};

use super::wire::{Filter, QueryRequest, QueryResponse, ScoredPoint, SearchRequest, SearchResponse};
use crate::payload::parse_payload;

const BACKEND: &str = "qdrant";

const SHAPE_UNRESOLVED: u8 = 0;
const SHAPE_QUERY: u8 = 1;
const SHAPE_SEARCH: u8 = 2;

/// Qdrant collection behind `IVectorIndex`. Reports cosine similarity.
pub struct QdrantIndex {
    http: Client,
    base_url: String,
    collection: String,
    url_keys: Vec<String>,
    shape: AtomicU8,
}

enum CallOutcome<T> {
    Ok(T),
    NotFound,
}

impl QdrantIndex {
    pub fn new(collection: &str, config: &QdrantIndexConfig) -> RecallResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).map_err(|e| IndexError::InvalidArgument {
                reason: format!("api key is not a valid header value: {e}"),
            })?;
            headers.insert(HeaderName::from_static("api-key"), value);
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| backend_err(format!("cannot build HTTP client: {e}")))?;

        let shape = match config.api {
            QdrantApi::Query => SHAPE_QUERY,
            QdrantApi::Search => SHAPE_SEARCH,
            QdrantApi::Auto => SHAPE_UNRESOLVED,
        };

        info!(
            url = %config.url,
            collection,
            api = ?config.api,
            "qdrant index configured"
        );

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            collection: collection.to_string(),
            url_keys: config.url_keys.clone(),
            shape: AtomicU8::new(shape),
        })
    }

    /// The call shape in use, if resolved.
    pub fn resolved_api(&self) -> Option<QdrantApi> {
        match self.shape.load(Ordering::Relaxed) {
            SHAPE_QUERY => Some(QdrantApi::Query),
            SHAPE_SEARCH => Some(QdrantApi::Search),
            _ => None,
        }
    }

    fn points_url(&self, endpoint: &str) -> String {
        format!(
            "{}/collections/{}/points/{endpoint}",
            self.base_url, self.collection
        )
    }

    fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> RecallResult<CallOutcome<R>> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .map_err(|e| backend_err(format!("POST {url}: {e}")))?;
        read_json(response, url)
    }

    fn call_query(
        &self,
        vector: &[f32],
        k: usize,
        filter: Option<&SourceTag>,
    ) -> RecallResult<CallOutcome<Vec<ScoredPoint>>> {
        let body = QueryRequest {
            query: vector,
            limit: k,
            with_payload: true,
            filter: filter.map(|s| Filter::source_equals(s.as_str())),
        };
        Ok(
            match self.post::<_, QueryResponse>(&self.points_url("query"), &body)? {
                CallOutcome::Ok(resp) => CallOutcome::Ok(resp.result.points),
                CallOutcome::NotFound => CallOutcome::NotFound,
            },
        )
    }

    fn call_search(
        &self,
        vector: &[f32],
        k: usize,
        filter: Option<&SourceTag>,
    ) -> RecallResult<CallOutcome<Vec<ScoredPoint>>> {
        let body = SearchRequest {
            vector,
            limit: k,
            with_payload: true,
            filter: filter.map(|s| Filter::source_equals(s.as_str())),
        };
        Ok(
            match self.post::<_, SearchResponse>(&self.points_url("search"), &body)? {
                CallOutcome::Ok(resp) => CallOutcome::Ok(resp.result),
                CallOutcome::NotFound => CallOutcome::NotFound,
            },
        )
    }

    /// `GET /collections/{c}`: 200 → true, 404 → false.
    pub fn collection_exists(&self) -> RecallResult<bool> {
        let url = format!("{}/collections/{}", self.base_url, self.collection);
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| backend_err(format!("GET {url}: {e}")))?;
        match response.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            s => Err(backend_err(format!(
                "GET {url} returned {s}: {}",
                response.text().unwrap_or_default()
            ))
            .into()),
        }
    }

    fn unavailable(&self) -> IndexError {
        IndexError::Unavailable {
            collection: self.collection.clone(),
        }
    }

    fn fetch(
        &self,
        vector: &[f32],
        k: usize,
        filter: Option<&SourceTag>,
    ) -> RecallResult<Vec<ScoredPoint>> {
        match self.shape.load(Ordering::Relaxed) {
            SHAPE_QUERY => match self.call_query(vector, k, filter)? {
                CallOutcome::Ok(points) => Ok(points),
                CallOutcome::NotFound => Err(self.unavailable().into()),
            },
            SHAPE_SEARCH => match self.call_search(vector, k, filter)? {
                CallOutcome::Ok(points) => Ok(points),
                CallOutcome::NotFound => Err(self.unavailable().into()),
            },
            _ => match self.call_query(vector, k, filter)? {
                CallOutcome::Ok(points) => {
                    self.shape.store(SHAPE_QUERY, Ordering::Relaxed);
                    debug!(collection = %self.collection, "qdrant api resolved to query");
                    Ok(points)
                }
                CallOutcome::NotFound => {
                    if !self.collection_exists()? {
                        return Err(self.unavailable().into());
                    }
                    warn!(
                        collection = %self.collection,
                        "points/query not supported by server, falling back to points/search"
                    );
                    match self.call_search(vector, k, filter)? {
                        CallOutcome::Ok(points) => {
                            self.shape.store(SHAPE_SEARCH, Ordering::Relaxed);
                            Ok(points)
                        }
                        CallOutcome::NotFound => Err(self.unavailable().into()),
                    }
                }
            },
        }
    }
}

fn backend_err(reason: String) -> IndexError {
    IndexError::BackendCall {
        backend: BACKEND.to_string(),
        reason,
    }
}

fn read_json<R: DeserializeOwned>(response: Response, url: &str) -> RecallResult<CallOutcome<R>> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(CallOutcome::NotFound);
    }
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(backend_err(format!("POST {url} returned {status}: {body}")).into());
    }
    let parsed = response
        .json::<R>()
        .map_err(|e| backend_err(format!("invalid response from {url}: {e}")))?;
    Ok(CallOutcome::Ok(parsed))
}

impl IVectorIndex for QdrantIndex {
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

        let mut points = self.fetch(vector, k, filter)?;
        points.truncate(k);

        let hits = points
            .into_iter()
            .map(|point| {
                let id = point.id_string();
                let payload = parse_payload(&id, point.payload.as_ref(), &self.url_keys)?;
                Ok(IndexHit {
                    id,
                    raw_score: RawScore::Similarity(point.score),
                    payload,
                })
            })
            .collect::<Result<Vec<_>, IndexError>>()?;

        debug!(
            collection = %self.collection,
            source = filter.map(SourceTag::as_str),
            top_k = k,
            hits = hits.len(),
            "qdrant search complete"
        );
        Ok(hits)
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    fn name(&self) -> &str {
        BACKEND
    }
}
