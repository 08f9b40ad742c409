//! Agro Advisor - Backend Server

use std::{net::SocketAddr, sync::Arc};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agro_advisor_backend::{
    config::Config, create_app, external::weather::WeatherClient, ml::ModelRegistry, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agro_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Agro Advisor Server");
    tracing::info!("Environment: {}", config.environment);

    // Load model artifacts once; they are read-only for the process lifetime
    let models = ModelRegistry::load(&config.models)?;
    tracing::info!("Model artifacts loaded: {}", models.describe());

    let weather = WeatherClient::new(
        config.weather.api_key.clone(),
        config.weather.api_endpoint.clone(),
        config.weather.geo_endpoint.clone(),
    );

    let state = AppState {
        config: Arc::new(config.clone()),
        models: Arc::new(models),
        weather,
    };

    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
