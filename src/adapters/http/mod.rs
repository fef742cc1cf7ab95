//! HTTP adapters - REST API implementations.

pub mod practice;

use axum::{routing::get, Json, Router};

pub use practice::{practice_routes, PracticeHandlers};

use practice::HealthResponse;

/// Assembles the public API.
///
/// Routes:
/// - `GET /health` - Liveness probe
/// - `/api/practice-sessions/...` - See [`practice_routes`]
pub fn api_router(handlers: PracticeHandlers) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/practice-sessions", practice_routes(handlers))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
