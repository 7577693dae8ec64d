//! Offline hashed term-frequency provider.
//!
//! Terms are hashed into fixed-dimension buckets and weighted by frequency
//! and a length-based IDF approximation, then L2-normalized. Deterministic,
//! needs no network, and is what the tests and benches embed with.

use std::collections::HashMap;

use recall_core::errors::RecallResult;
use recall_core::traits::IEmbeddingProvider;

/// Deterministic local embedding provider.
pub struct TfIdfProvider {
    dimensions: usize,
}

impl TfIdfProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn bucket(term: &str, dims: usize) -> usize {
        let digest = blake3::hash(term.as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest.as_bytes()[..8]);
        (u64::from_le_bytes(head) % dims as u64) as usize
    }

    /// Lowercase alphanumeric terms of at least two characters.
    fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|s| s.chars().count() >= 2)
            .map(str::to_lowercase)
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut out = vec![0.0f32; self.dimensions];
        if self.dimensions == 0 {
            return out;
        }

        let mut counts: HashMap<String, u32> = HashMap::new();
        let mut total = 0u32;
        for term in Self::tokenize(text) {
            *counts.entry(term).or_default() += 1;
            total += 1;
        }
        if total == 0 {
            return out;
        }

        for (term, count) in &counts {
            let tf = *count as f32 / total as f32;
            let idf = 1.0 + (term.chars().count() as f32).ln();
            out[Self::bucket(term, self.dimensions)] += tf * idf;
        }

        let norm = out.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            out.iter_mut().for_each(|v| *v /= norm);
        }
        out
    }
}

impl IEmbeddingProvider for TfIdfProvider {
    fn embed(&self, text: &str) -> RecallResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> RecallResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "tfidf"
    }
}
