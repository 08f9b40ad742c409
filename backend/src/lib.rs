//! Agro Advisor - backend server library
//!
//! A consolidated advisory service for farmers: crop recommendation,
//! soil-health classification, crop-rotation recommendation,
//! weather-based crop advice, and sustainability scoring.

use std::sync::Arc;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod ml;
pub mod routes;

pub use config::Config;

use external::weather::WeatherClient;
use ml::ModelRegistry;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Model artifacts, loaded once at startup and read-only thereafter.
    pub models: Arc<ModelRegistry>,
    pub weather: WeatherClient,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::advisory_routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
