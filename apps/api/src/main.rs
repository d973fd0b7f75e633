mod config;
mod embedding_client;
mod errors;
mod extract;
mod routes;
mod screening;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::embedding_client::EmbeddingClient;
use crate::routes::build_router;
use crate::screening::engine::{Engine, EngineSettings};
use crate::screening::oracle::{LexicalOracle, OracleBackend, SemanticOracle, SimilarityOracle};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting WhiteSwan API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the similarity oracle (lexical unless ORACLE_BACKEND=semantic).
    // The embedding client is constructed here once and probed lazily on first use.
    let (oracle, embedding): (Arc<dyn SimilarityOracle>, Option<EmbeddingClient>) =
        match config.oracle_backend {
            OracleBackend::Semantic => {
                let url = config.embedding_url.clone().unwrap_or_default();
                let client = EmbeddingClient::new(
                    url.clone(),
                    config.embedding_model.clone(),
                    config.embedding_api_key.clone(),
                )?;
                info!(
                    "Embedding client initialized (model: {}, endpoint: {url})",
                    config.embedding_model
                );
                (Arc::new(SemanticOracle::new(client.clone())), Some(client))
            }
            OracleBackend::Lexical => (Arc::new(LexicalOracle), None),
        };

    let settings = EngineSettings {
        aggregation: config.aggregation_mode,
        granularity: config.granularity,
        thresholds: config.fit_thresholds,
        oracle_timeout: config.oracle_timeout,
        max_concurrency: config.max_scoring_concurrency,
    };
    info!(
        "Screening engine: oracle={}, aggregation={}, granularity={}, thresholds={:?}",
        oracle.backend(),
        settings.aggregation,
        settings.granularity,
        settings.thresholds
    );
    let engine = Engine::new(oracle, settings);

    // Build app state
    let state = AppState {
        config: config.clone(),
        engine,
        embedding,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
