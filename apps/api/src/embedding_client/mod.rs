/// Embedding Client: the single point of entry for the external embedding service.
///
/// ARCHITECTURAL RULE: No other module may call the embedding API directly.
/// The semantic oracle goes through this client.
///
/// Speaks the OpenAI-compatible `/v1/embeddings` shape, which sentence-transformers
/// servers (e.g. text-embeddings-inference) also expose.
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 60;
const PROBE_TEXT: &str = "ready";
/// Inputs per request. text-embeddings-inference rejects larger client batches by default.
pub const MAX_BATCH_SIZE: usize = 32;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Embedding service returned {got} vectors for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },

    #[error("Embedding dimension {got} does not match model dimension {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Embedding service returned an empty vector")]
    EmptyVector,

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },
}

/// Lifecycle of the client: the first successful call moves it to `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EmbeddingState {
    Uninitialized,
    Ready { dimension: usize },
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Shared handle to the embedding service. Cheap to clone; all clones share
/// the same readiness cell, so the backend is probed once per process.
#[derive(Clone)]
pub struct EmbeddingClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    ready: Arc<OnceCell<usize>>,
}

impl EmbeddingClient {
    pub fn new(
        endpoint: String,
        model: String,
        api_key: Option<String>,
    ) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            model,
            api_key,
            ready: Arc::new(OnceCell::new()),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn state(&self) -> EmbeddingState {
        match self.ready.get() {
            Some(&dimension) => EmbeddingState::Ready { dimension },
            None => EmbeddingState::Uninitialized,
        }
    }

    /// Probes the backend on first use and returns the embedding dimension.
    /// Concurrent first callers wait on the same probe.
    pub async fn ensure_ready(&self) -> Result<usize, EmbeddingError> {
        let dimension = self
            .ready
            .get_or_try_init(|| async {
                let vectors = self.call(&[PROBE_TEXT]).await?;
                let dimension = vectors.first().map(Vec::len).unwrap_or(0);
                if dimension == 0 {
                    return Err(EmbeddingError::EmptyVector);
                }
                info!(
                    "Embedding backend ready (model: {}, dimension: {dimension})",
                    self.model
                );
                Ok(dimension)
            })
            .await?;
        Ok(*dimension)
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.embed_batch(&[text]).await?;
        vectors.pop().ok_or(EmbeddingError::CountMismatch {
            expected: 1,
            got: 0,
        })
    }

    /// Encodes `texts`, returning vectors in input order. Large inputs are sent
    /// in chunks of `MAX_BATCH_SIZE`.
    pub async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let dimension = self.ensure_ready().await?;
        let mut vectors = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(MAX_BATCH_SIZE) {
            vectors.extend(self.call(chunk).await?);
        }

        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(EmbeddingError::DimensionMismatch {
                expected: dimension,
                got: bad.len(),
            });
        }
        Ok(vectors)
    }

    /// Raw call with retry on 429 and 5xx, exponential backoff.
    async fn call(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let request_body = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let mut last_error: Option<EmbeddingError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 500ms, 1s
                let delay = Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.post(&self.endpoint).json(&request_body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EmbeddingError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Embedding API returned {}: {}", status, body);
                last_error = Some(EmbeddingError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(EmbeddingError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: EmbeddingResponse = response.json().await?;
            debug!("Embedding call succeeded: inputs={}", texts.len());
            return into_vectors(parsed, texts.len());
        }

        Err(last_error.unwrap_or(EmbeddingError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

/// Restores input order from the response's `index` fields and checks the count.
fn into_vectors(
    mut response: EmbeddingResponse,
    expected: usize,
) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    if response.data.len() != expected {
        return Err(EmbeddingError::CountMismatch {
            expected,
            got: response.data.len(),
        });
    }
    response.data.sort_by_key(|d| d.index);
    Ok(response.data.into_iter().map(|d| d.embedding).collect())
}
