//! Sustainability scoring handler

use std::collections::BTreeMap;

use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use shared::models::sustainability::{assess_sustainability, FarmingPractices};
use shared::models::weather::{aggregate_daily, WeatherSnapshot};

use crate::error::AppResult;
use crate::external::weather::Location;
use crate::AppState;

/// Sustainability survey form. Every field is free text; absent or
/// unparseable optional numbers degrade to "not provided" rather than
/// failing the request.
#[derive(Debug, Deserialize)]
pub struct SustainabilityForm {
    #[serde(default)]
    pub irrigation: String,
    #[serde(default)]
    pub pesticide_use: String,
    #[serde(default)]
    pub tillage: String,
    #[serde(default)]
    pub cover_crops: Option<String>,
    #[serde(default)]
    pub organic_matter_percent: Option<String>,
    #[serde(default)]
    pub rotation_diversity: Option<String>,
    #[serde(default)]
    pub drainage: String,
    /// Optional city for weather-aware penalties and suggestions.
    #[serde(default)]
    pub city: String,
}

#[derive(Template)]
#[template(path = "sustainability_report.html")]
struct SustainabilityReportTemplate {
    score: i32,
    suggestions: Vec<String>,
    weather_note: Option<String>,
}

/// Score the submitted practices. Weather context is best-effort: a
/// failed fetch downgrades to a practice-only score instead of erroring.
pub async fn calculate_sustainability(
    State(state): State<AppState>,
    Form(form): Form<SustainabilityForm>,
) -> AppResult<Response> {
    let practices = FarmingPractices {
        irrigation: form.irrigation,
        pesticide_use: form.pesticide_use,
        tillage: form.tillage,
        cover_crops: checkbox(form.cover_crops.as_deref()),
        organic_matter_percent: form
            .organic_matter_percent
            .as_deref()
            .and_then(|v| v.trim().parse().ok()),
        rotation_diversity: form
            .rotation_diversity
            .as_deref()
            .and_then(|v| v.trim().parse().ok()),
        drainage: form.drainage,
    };

    let city = form.city.trim();
    let (current, weekly, weather_note) = if city.is_empty() {
        (None, BTreeMap::new(), None)
    } else {
        match weather_context(&state, city).await {
            Ok((current, weekly)) => (Some(current), weekly, None),
            Err(err) => {
                tracing::warn!(%city, error = %err, "weather context unavailable, scoring practices only");
                (
                    None,
                    BTreeMap::new(),
                    Some(format!(
                        "Weather for {} was unavailable; the score reflects practices only.",
                        city
                    )),
                )
            }
        }
    };

    let report = assess_sustainability(&practices, current.as_ref(), &weekly);
    tracing::debug!(score = report.score, "sustainability assessed");

    Ok(SustainabilityReportTemplate {
        score: report.score,
        suggestions: report.suggestions,
        weather_note,
    }
    .into_response())
}

async fn weather_context(
    state: &AppState,
    city: &str,
) -> AppResult<(
    WeatherSnapshot,
    BTreeMap<chrono::NaiveDate, shared::models::weather::DailyForecast>,
)> {
    let location = Location::City(city.to_string());
    let current = state.weather.current(&location).await?;
    let forecast = state.weather.forecast(&location).await?;
    let weekly = aggregate_daily(&forecast.samples, forecast.timezone_offset_seconds);
    Ok((current, weekly))
}

/// HTML checkboxes submit "on" when ticked and nothing otherwise.
fn checkbox(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("on" | "yes" | "true" | "1")
    )
}

#[cfg(test)]
mod tests {
    use super::checkbox;

    #[test]
    fn checkbox_accepts_common_truthy_values() {
        assert!(checkbox(Some("on")));
        assert!(checkbox(Some("Yes")));
        assert!(checkbox(Some("1")));
        assert!(!checkbox(Some("off")));
        assert!(!checkbox(None));
    }
}
