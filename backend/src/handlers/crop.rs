//! Crop recommendation handler

use axum::{extract::State, response::Response, Form};
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::pages::render_result;
use crate::handlers::parse_float;
use crate::AppState;

/// Crop recommendation form fields, submitted as strings.
#[derive(Debug, Deserialize)]
pub struct CropForm {
    pub nitrogen: String,
    pub phosphorus: String,
    pub potassium: String,
    pub ph: String,
    #[serde(default)]
    pub location: String,
}

/// Recommend a crop from soil nutrient levels and pH.
pub async fn recommend_crop(
    State(state): State<AppState>,
    Form(form): Form<CropForm>,
) -> AppResult<Response> {
    let nitrogen = parse_float("nitrogen", &form.nitrogen)?;
    let phosphorus = parse_float("phosphorus", &form.phosphorus)?;
    let potassium = parse_float("potassium", &form.potassium)?;
    let ph = parse_float("ph", &form.ph)?;

    let crop = state
        .models
        .recommend_crop(nitrogen, phosphorus, potassium, ph)?;

    tracing::debug!(%crop, "crop recommendation produced");

    let location = form.location.trim();
    let message = if location.is_empty() {
        format!("Recommended crop: {}", crop)
    } else {
        format!("Recommended crop for {}: {}", location, crop)
    };
    render_result(message)
}
