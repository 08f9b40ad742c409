//! HTTP request handlers

pub mod crop;
pub mod health;
pub mod pages;
pub mod rotation;
pub mod soil;
pub mod sustainability;
pub mod weather;

pub use crop::recommend_crop;
pub use health::health_check;
pub use pages::{
    crop_form, home, rotation_form, soil_form, soil_health_form, sustainability_form,
    weather_form,
};
pub use rotation::recommend_rotation;
pub use soil::{predict_soil, predict_soil_health};
pub use sustainability::calculate_sustainability;
pub use weather::weather_report;

use crate::error::{AppError, AppResult};

/// Parse one numeric form field, naming the field in the error.
pub(crate) fn parse_float(field: &str, raw: &str) -> AppResult<f64> {
    raw.trim().parse().map_err(|_| AppError::Validation {
        field: field.to_string(),
        message: format!("{} must be a number, got {:?}", field, raw.trim()),
    })
}
