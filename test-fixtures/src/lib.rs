//! Test fixture loader for recall golden scenarios.
//!
//! Fixture files live under `test-fixtures/golden/` at the workspace root and
//! are loaded by relative path, e.g. `golden/fusion/shared_url.json`.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("golden").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// Relative paths (`golden/<subdir>/<file>`) of every scenario in `subdir`.
pub fn list_scenarios(subdir: &str) -> Vec<String> {
    list_fixtures(subdir)
        .into_iter()
        .filter_map(|p| {
            let name = p.file_name()?.to_str()?.to_string();
            Some(format!("{subdir}/{name}"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Typed scenarios
// ---------------------------------------------------------------------------

/// A hit as it comes back from one fusion stream.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamHit {
    pub text: String,
    pub source: String,
    #[serde(default)]
    pub source_url: String,
    pub score: f64,
}

/// Expected fused entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedFusedHit {
    pub source_url: String,
    pub score: f64,
    pub authority: String,
}

/// `golden/fusion/*.json`: two streams in, one fused list out.
#[derive(Debug, Clone, Deserialize)]
pub struct FusionScenario {
    pub name: String,
    pub primary: Vec<StreamHit>,
    pub supporting: Vec<StreamHit>,
    pub expected: Vec<ExpectedFusedHit>,
}

/// A stored chunk with a hand-written embedding.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureChunk {
    pub id: String,
    pub text: String,
    pub source: String,
    #[serde(default)]
    pub source_url: String,
    pub embedding: Vec<f32>,
}

/// One query against a retrieval scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureQuery {
    pub query: String,
    /// Vector the test provider returns for `query`.
    pub vector: Vec<f32>,
    pub top_k: usize,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
    /// Chunk ids, best first.
    pub expected_ids: Vec<String>,
}

/// `golden/retrieval/*.json`: a collection plus queries with expected ids.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalScenario {
    pub name: String,
    /// `"l2"` or `"cosine"`.
    pub distance: String,
    pub chunks: Vec<FixtureChunk>,
    pub queries: Vec<FixtureQuery>,
}
