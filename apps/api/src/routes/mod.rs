pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Screening API
        .route("/api/v1/screen", post(handlers::handle_screen))
        .route(
            "/api/v1/screen/upload",
            post(handlers::handle_screen_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/keywords", post(handlers::handle_keywords))
        .with_state(state)
}
