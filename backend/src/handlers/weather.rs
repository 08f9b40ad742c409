//! Weather advisory handler

use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Form,
};
use chrono::Utc;
use serde::Deserialize;

use shared::models::advice::{advise_for_crop, CropAdvice};
use shared::models::weather::{aggregate_daily, local_date, upcoming_week, DailyForecast, WeatherSnapshot};
use shared::types::GpsCoordinates;

use crate::error::{AppError, AppResult};
use crate::external::weather::Location;
use crate::AppState;

/// Weather form: a city name, or a coordinate pair, plus an optional crop
/// for the advisory section.
#[derive(Debug, Deserialize)]
pub struct WeatherForm {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub crop: String,
}

#[derive(Template)]
#[template(path = "weather_report.html")]
struct WeatherReportTemplate {
    location_name: String,
    current: WeatherSnapshot,
    days: Vec<DailyForecast>,
    crop: String,
    advice: CropAdvice,
}

/// Current conditions, the week's daily outlook, and crop advice for a
/// city or coordinate pair.
pub async fn weather_report(
    State(state): State<AppState>,
    Form(form): Form<WeatherForm>,
) -> AppResult<Response> {
    let location = resolve_location(&form)?;

    let current = state.weather.current(&location).await?;
    let forecast = state.weather.forecast(&location).await?;

    // Coordinates get a readable place name when the geocoder knows one.
    let location_name = match &location {
        Location::Coordinates(coords) => state
            .weather
            .reverse_geocode(coords)
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| current.location_name.clone()),
        Location::City(_) => {
            if forecast.city_name.is_empty() {
                current.location_name.clone()
            } else {
                forecast.city_name.clone()
            }
        }
    };

    let daily = aggregate_daily(&forecast.samples, forecast.timezone_offset_seconds);
    let today = local_date(Utc::now(), forecast.timezone_offset_seconds);
    let week = upcoming_week(&daily, today);

    let crop = form.crop.trim().to_string();
    let advice = advise_for_crop(&crop, Some(&current), &week);

    let days: Vec<DailyForecast> = week.into_values().collect();

    tracing::debug!(%location_name, days = days.len(), "weather report assembled");

    Ok(WeatherReportTemplate {
        location_name,
        current,
        days,
        crop,
        advice,
    }
    .into_response())
}

/// A non-empty city wins over coordinates; coordinates must parse as a
/// latitude/longitude pair; neither is a validation error.
fn resolve_location(form: &WeatherForm) -> AppResult<Location> {
    let city = form.city.trim();
    if !city.is_empty() {
        return Ok(Location::City(city.to_string()));
    }

    let latitude = form.latitude.trim();
    let longitude = form.longitude.trim();
    if latitude.is_empty() || longitude.is_empty() {
        return Err(AppError::ValidationError(
            "provide a city name or both latitude and longitude".to_string(),
        ));
    }

    let latitude = latitude.parse().map_err(|_| AppError::Validation {
        field: "latitude".to_string(),
        message: format!("latitude must be a number, got {:?}", latitude),
    })?;
    let longitude = longitude.parse().map_err(|_| AppError::Validation {
        field: "longitude".to_string(),
        message: format!("longitude must be a number, got {:?}", longitude),
    })?;

    Ok(Location::Coordinates(GpsCoordinates::new(
        latitude, longitude,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(city: &str, lat: &str, lon: &str) -> WeatherForm {
        WeatherForm {
            city: city.to_string(),
            latitude: lat.to_string(),
            longitude: lon.to_string(),
            crop: String::new(),
        }
    }

    #[test]
    fn city_takes_precedence_over_coordinates() {
        let location = resolve_location(&form("Nairobi", "10", "20")).unwrap();
        assert!(matches!(location, Location::City(ref c) if c == "Nairobi"));
    }

    #[test]
    fn coordinates_used_when_city_blank() {
        let location = resolve_location(&form("  ", "-1.29", "36.82")).unwrap();
        assert!(matches!(location, Location::Coordinates(_)));
    }

    #[test]
    fn missing_everything_is_a_validation_error() {
        let err = resolve_location(&form("", "", "")).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn unparseable_latitude_is_a_validation_error() {
        let err = resolve_location(&form("", "north", "36.8")).unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "latitude"));
    }
}
