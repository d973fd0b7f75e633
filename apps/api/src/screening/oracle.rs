//! Similarity Oracle: pluggable, trait-based scorer of text-to-text similarity.
//!
//! Default: `LexicalOracle` (bag-of-words cosine, pure Rust, deterministic).
//! `SemanticOracle` delegates encoding to the embedding service via `EmbeddingClient`.
//!
//! `AppState` holds the engine, which carries an `Arc<dyn SimilarityOracle>` chosen at startup.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::embedding_client::{EmbeddingClient, EmbeddingError};
use crate::screening::keywords::terms;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleBackend {
    Semantic,
    #[default]
    Lexical,
}

impl OracleBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            OracleBackend::Semantic => "semantic",
            OracleBackend::Lexical => "lexical",
        }
    }
}

impl fmt::Display for OracleBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OracleBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "semantic" => Ok(OracleBackend::Semantic),
            "lexical" => Ok(OracleBackend::Lexical),
            other => Err(format!("unknown oracle backend '{other}'")),
        }
    }
}

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Embedding backend error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Oracle call timed out after {millis}ms")]
    Timeout { millis: u64 },

    #[error("Oracle unavailable: {0}")]
    Unavailable(String),
}

/// Encoded form of a text. Dense vectors come from the embedding model,
/// sparse term-frequency vectors from the lexical backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Embedding {
    Dense(Vec<f32>),
    Sparse(BTreeMap<String, f32>),
}

impl Embedding {
    /// Cosine similarity. Mismatched kinds or lengths and zero vectors score 0.0.
    pub fn cosine(&self, other: &Embedding) -> f32 {
        match (self, other) {
            (Embedding::Dense(a), Embedding::Dense(b)) => dense_cosine(a, b),
            (Embedding::Sparse(a), Embedding::Sparse(b)) => sparse_cosine(a, b),
            _ => 0.0,
        }
    }
}

fn dense_cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

fn sparse_cosine(a: &BTreeMap<String, f32>, b: &BTreeMap<String, f32>) -> f32 {
    // Key order is sorted on both sides, so the sum is order-independent of argument position.
    let dot: f32 = a
        .iter()
        .filter_map(|(term, x)| b.get(term).map(|y| x * y))
        .sum();
    let norm_a: f32 = a.values().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.values().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// The oracle trait. Implement this to swap similarity backends without touching
/// the engine or the handlers.
///
/// Implementations must be deterministic for fixed inputs and symmetric:
/// `similarity(a, b) == similarity(b, a)`.
#[async_trait]
pub trait SimilarityOracle: Send + Sync {
    fn backend(&self) -> OracleBackend;

    async fn encode(&self, text: &str) -> Result<Embedding, OracleError>;

    async fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, OracleError> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.encode(text).await?);
        }
        Ok(out)
    }

    fn similarity(&self, a: &Embedding, b: &Embedding) -> f32 {
        a.cosine(b)
    }

    #[allow(dead_code)]
    async fn similarity_text(&self, a: &str, b: &str) -> Result<f32, OracleError> {
        let ea = self.encode(a).await?;
        let eb = self.encode(b).await?;
        Ok(self.similarity(&ea, &eb))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LexicalOracle: default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Bag-of-words oracle: term-frequency vectors over the keyword cleaning rule.
pub struct LexicalOracle;

impl LexicalOracle {
    pub fn term_frequencies(text: &str) -> BTreeMap<String, f32> {
        let mut counts = BTreeMap::new();
        for term in terms(text) {
            *counts.entry(term).or_insert(0.0) += 1.0;
        }
        counts
    }
}

#[async_trait]
impl SimilarityOracle for LexicalOracle {
    fn backend(&self) -> OracleBackend {
        OracleBackend::Lexical
    }

    async fn encode(&self, text: &str) -> Result<Embedding, OracleError> {
        Ok(Embedding::Sparse(Self::term_frequencies(text)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SemanticOracle: embedding-model backend
// ────────────────────────────────────────────────────────────────────────────

/// Sentence-embedding oracle. The wrapped client is initialized lazily, once.
pub struct SemanticOracle {
    client: EmbeddingClient,
}

impl SemanticOracle {
    pub fn new(client: EmbeddingClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SimilarityOracle for SemanticOracle {
    fn backend(&self) -> OracleBackend {
        OracleBackend::Semantic
    }

    async fn encode(&self, text: &str) -> Result<Embedding, OracleError> {
        Ok(Embedding::Dense(self.client.embed(text).await?))
    }

    async fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, OracleError> {
        let vectors = self.client.embed_batch(texts).await?;
        Ok(vectors.into_iter().map(Embedding::Dense).collect())
    }
}
