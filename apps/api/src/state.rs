use crate::config::Config;
use crate::embedding_client::EmbeddingClient;
use crate::screening::engine::Engine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Screening engine with the oracle selected at startup (ORACLE_BACKEND).
    pub engine: Engine,
    /// Embedding service handle when the semantic backend is active.
    /// Shared with the oracle, so /health reports its real readiness.
    pub embedding: Option<EmbeddingClient>,
}
