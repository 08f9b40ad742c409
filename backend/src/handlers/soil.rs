//! Soil health handlers: the threshold rule engine and the trained
//! classifier variant

use axum::{extract::State, response::Response, Form};
use serde::Deserialize;

use shared::models::soil::{assess_soil, SoilSample};

use crate::error::AppResult;
use crate::handlers::pages::render_result;
use crate::handlers::parse_float;
use crate::AppState;

/// Rule-engine soil form: six lab measurements.
#[derive(Debug, Deserialize)]
pub struct SoilForm {
    pub ph: String,
    pub nitrogen: String,
    pub phosphorus: String,
    pub potassium: String,
    pub organic_carbon: String,
    pub moisture: String,
}

/// Classifier soil form: the five features the model was trained on.
#[derive(Debug, Deserialize)]
pub struct SoilHealthForm {
    pub ph: String,
    pub organic_matter: String,
    pub nitrogen: String,
    pub phosphorus: String,
    pub potassium: String,
}

/// Score a sample against the six soil thresholds and render the
/// classification with its advisory sentence.
pub async fn predict_soil(
    State(_state): State<AppState>,
    Form(form): Form<SoilForm>,
) -> AppResult<Response> {
    let sample = SoilSample {
        ph: parse_float("ph", &form.ph)?,
        nitrogen: parse_float("nitrogen", &form.nitrogen)?,
        phosphorus: parse_float("phosphorus", &form.phosphorus)?,
        potassium: parse_float("potassium", &form.potassium)?,
        organic_carbon: parse_float("organic_carbon", &form.organic_carbon)?,
        moisture: parse_float("moisture", &form.moisture)?,
    };

    let report = assess_soil(&sample);
    tracing::debug!(score = report.score, status = %report.status, "soil sample assessed");

    render_result(format!(
        "Soil health: {} (score {}/6). {}",
        report.status, report.score, report.suggestion
    ))
}

/// Classify soil health with the trained model.
pub async fn predict_soil_health(
    State(state): State<AppState>,
    Form(form): Form<SoilHealthForm>,
) -> AppResult<Response> {
    let ph = parse_float("ph", &form.ph)?;
    let organic_matter = parse_float("organic_matter", &form.organic_matter)?;
    let nitrogen = parse_float("nitrogen", &form.nitrogen)?;
    let phosphorus = parse_float("phosphorus", &form.phosphorus)?;
    let potassium = parse_float("potassium", &form.potassium)?;

    let label = state
        .models
        .classify_soil_health(ph, organic_matter, nitrogen, phosphorus, potassium)?;

    render_result(format!("Predicted soil health: {}", title_case(&label)))
}

/// Uppercase the first letter of each whitespace-separated word.
pub(crate) fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
