use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::store::ExerciseStore;

pub fn health_routes(store: Arc<dyn ExerciseStore>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(store)
}

/// Report whether the store answers
pub async fn health_check(
    State(store): State<Arc<dyn ExerciseStore>>,
) -> (StatusCode, Json<Value>) {
    match store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "healthy" }))),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy", "error": e.to_string() })),
            )
        }
    }
}
