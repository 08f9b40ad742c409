//! Route definitions for the advisory service
//!
//! One consolidated route table: each advisory gets a GET form page and a
//! POST endpoint that renders the result.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::AppState;

pub fn advisory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health_check))
        // Crop recommendation
        .route("/crop", get(handlers::crop_form))
        .route("/recommend", post(handlers::recommend_crop))
        // Soil health (threshold rules and trained classifier)
        .route("/soil", get(handlers::soil_form))
        .route("/predict-soil", post(handlers::predict_soil))
        .route("/soil-form", get(handlers::soil_health_form))
        .route("/predict_soil_health", post(handlers::predict_soil_health))
        // Weather advisory
        .route(
            "/weather",
            get(handlers::weather_form).post(handlers::weather_report),
        )
        // Crop rotation
        .route("/rotation", get(handlers::rotation_form))
        .route("/rotation-result", post(handlers::recommend_rotation))
        // Sustainability scoring
        .route("/sustainability", get(handlers::sustainability_form))
        .route(
            "/calculate_sustainability",
            post(handlers::calculate_sustainability),
        )
}
