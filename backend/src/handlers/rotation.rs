//! Crop rotation recommendation handler

use axum::{extract::State, response::Response, Form};
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::pages::render_result;
use crate::handlers::soil::title_case;
use crate::AppState;

/// Rotation form: three categorical features the encoders were fit on.
#[derive(Debug, Deserialize)]
pub struct RotationForm {
    pub last_crop: String,
    pub soil_type: String,
    pub season: String,
}

/// Recommend the next crop in a rotation.
pub async fn recommend_rotation(
    State(state): State<AppState>,
    Form(form): Form<RotationForm>,
) -> AppResult<Response> {
    let crop = state
        .models
        .recommend_rotation(&form.last_crop, &form.soil_type, &form.season)?;

    tracing::debug!(
        last_crop = %form.last_crop,
        soil_type = %form.soil_type,
        season = %form.season,
        recommendation = %crop,
        "rotation recommendation produced"
    );

    render_result(format!(
        "Recommended next crop after {}: {}",
        form.last_crop.trim(),
        title_case(&crop)
    ))
}
