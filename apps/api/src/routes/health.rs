use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and the active screening configuration.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let settings = state.engine.settings();
    let embedding = state.embedding.as_ref().map(|client| {
        json!({
            "model": client.model(),
            "lifecycle": client.state(),
        })
    });

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "whiteswan-api",
        "oracle_backend": state.engine.oracle().backend(),
        "aggregation_mode": settings.aggregation,
        "granularity": settings.granularity,
        "embedding": embedding,
    }))
}
