pub mod emergency_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Construir la aplicación completa con sus capas
pub fn create_app(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        if !state.config.is_development() {
            warn!("⚠️ CORS_ORIGINS vacío fuera de desarrollo: se permite cualquier origen");
        }
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/emergency", emergency_routes::create_emergency_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de salud simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "emergency-dispatch",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
