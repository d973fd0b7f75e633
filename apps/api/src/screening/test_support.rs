//! Deterministic oracle for engine and handler tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::screening::oracle::{Embedding, OracleBackend, OracleError, SimilarityOracle};

/// Oracle with hand-picked vectors. Anchor texts encode to `[1, 0]`; a text
/// registered with score `s` encodes to `[s, sqrt(1 - s²)]`, so its cosine
/// against any anchor is exactly `s`.
#[derive(Default)]
pub struct ScriptedOracle {
    vectors: HashMap<String, Vec<f32>>,
    failing: HashSet<String>,
    slow: HashMap<String, Duration>,
    calls: Mutex<HashMap<String, usize>>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(mut self, text: &str) -> Self {
        self.vectors.insert(text.to_string(), vec![1.0, 0.0]);
        self
    }

    pub fn scored(mut self, text: &str, score: f32) -> Self {
        let rest = (1.0 - score * score).max(0.0).sqrt();
        self.vectors.insert(text.to_string(), vec![score, rest]);
        self
    }

    pub fn failing(mut self, text: &str) -> Self {
        self.failing.insert(text.to_string());
        self
    }

    pub fn slow(mut self, text: &str, delay: Duration) -> Self {
        self.slow.insert(text.to_string(), delay);
        self
    }

    /// How many times `text` was encoded.
    pub fn calls(&self, text: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(text)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl SimilarityOracle for ScriptedOracle {
    fn backend(&self) -> OracleBackend {
        OracleBackend::Semantic
    }

    async fn encode(&self, text: &str) -> Result<Embedding, OracleError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(text.to_string())
            .or_insert(0) += 1;

        if let Some(delay) = self.slow.get(text) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(text) {
            return Err(OracleError::Unavailable(format!("scripted failure for '{text}'")));
        }
        self.vectors
            .get(text)
            .cloned()
            .map(Embedding::Dense)
            .ok_or_else(|| OracleError::Unavailable(format!("no scripted vector for '{text}'")))
    }
}
