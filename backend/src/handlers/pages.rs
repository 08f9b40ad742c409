//! Static form pages and the shared result page

use askama::Template;
use axum::response::{IntoResponse, Response};

use crate::error::AppResult;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate;

#[derive(Template)]
#[template(path = "crop.html")]
struct CropFormTemplate;

#[derive(Template)]
#[template(path = "soil.html")]
struct SoilFormTemplate;

#[derive(Template)]
#[template(path = "soil_health.html")]
struct SoilHealthFormTemplate;

#[derive(Template)]
#[template(path = "weather.html")]
struct WeatherFormTemplate;

#[derive(Template)]
#[template(path = "rotation.html")]
struct RotationFormTemplate;

#[derive(Template)]
#[template(path = "sustainability.html")]
struct SustainabilityFormTemplate;

/// Single-message result page used by the plain-text advisory handlers.
#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub message: String,
}

/// Render the shared result page with one message.
pub fn render_result(message: String) -> AppResult<Response> {
    Ok(ResultTemplate { message }.into_response())
}

pub async fn home() -> impl IntoResponse {
    IndexTemplate
}

pub async fn crop_form() -> impl IntoResponse {
    CropFormTemplate
}

pub async fn soil_form() -> impl IntoResponse {
    SoilFormTemplate
}

pub async fn soil_health_form() -> impl IntoResponse {
    SoilHealthFormTemplate
}

pub async fn weather_form() -> impl IntoResponse {
    WeatherFormTemplate
}

pub async fn rotation_form() -> impl IntoResponse {
    RotationFormTemplate
}

pub async fn sustainability_form() -> impl IntoResponse {
    SustainabilityFormTemplate
}
