//! Health check endpoint

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Liveness probe reporting the loaded model artifacts.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "agro-advisor-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "models": state.models.describe(),
    }))
}
