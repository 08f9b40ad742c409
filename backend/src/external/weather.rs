//! Weather API client for fetching weather data
//!
//! Integrates with OpenWeatherMap: current conditions, the 5-day/3-hour
//! forecast, and reverse geocoding for "use my location" submissions.

use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use shared::models::weather::{ForecastSample, WeatherSnapshot};
use shared::types::GpsCoordinates;

use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    geo_url: String,
}

/// City name or GPS coordinates accepted by the provider
#[derive(Debug, Clone)]
pub enum Location {
    City(String),
    Coordinates(GpsCoordinates),
}

impl Location {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Location::City(city) => vec![("q", city.clone())],
            Location::Coordinates(coords) => vec![
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
            ],
        }
    }

    fn describe(&self) -> String {
        match self {
            Location::City(city) => city.clone(),
            Location::Coordinates(coords) => {
                format!("{}, {}", coords.latitude, coords.longitude)
            }
        }
    }
}

/// 5-day/3-hour forecast for one location
#[derive(Debug, Clone)]
pub struct CityForecast {
    pub city_name: String,
    pub timezone_offset_seconds: i32,
    pub samples: Vec<ForecastSample>,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    weather: Vec<OwmWeather>,
    main: OwmMain,
    wind: OwmWind,
    rain: Option<OwmPrecipitation>,
    snow: Option<OwmPrecipitation>,
    dt: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmPrecipitation {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

impl OwmPrecipitation {
    fn last_hour_mm(entry: &Option<Self>) -> f64 {
        entry
            .as_ref()
            .and_then(|p| p.one_hour)
            .unwrap_or(0.0)
    }

    fn window_mm(entry: &Option<Self>) -> f64 {
        entry
            .as_ref()
            .and_then(|p| p.three_hour)
            .unwrap_or(0.0)
    }
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    city: OwmCity,
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmCity {
    name: String,
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    wind: OwmWind,
    rain: Option<OwmPrecipitation>,
    snow: Option<OwmPrecipitation>,
}

/// OpenWeatherMap reverse geocoding entry
#[derive(Debug, Deserialize)]
struct OwmGeoPlace {
    name: String,
    country: Option<String>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String, base_url: String, geo_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            geo_url,
        }
    }

    /// Fetch current conditions for a city or coordinate pair
    pub async fn current(&self, location: &Location) -> AppResult<WeatherSnapshot> {
        let url = format!("{}/weather", self.base_url);
        let data: OwmCurrentResponse = self.get_json(&url, location).await?;

        let precipitation = OwmPrecipitation::last_hour_mm(&data.rain)
            + OwmPrecipitation::last_hour_mm(&data.snow);

        Ok(WeatherSnapshot {
            location_name: data.name,
            observed_at: DateTime::from_timestamp(data.dt, 0).unwrap_or_else(Utc::now),
            temperature_celsius: dec(data.main.temp),
            humidity_percent: data.main.humidity,
            precipitation_mm: dec(precipitation),
            description: data
                .weather
                .first()
                .map(|w| w.description.clone())
                .unwrap_or_default(),
            wind_speed_mps: dec(data.wind.speed),
        })
    }

    /// Fetch the 5-day/3-hour forecast for a city or coordinate pair
    pub async fn forecast(&self, location: &Location) -> AppResult<CityForecast> {
        let url = format!("{}/forecast", self.base_url);
        let data: OwmForecastResponse = self.get_json(&url, location).await?;

        let samples = data
            .list
            .into_iter()
            .map(|item| {
                let precipitation =
                    OwmPrecipitation::window_mm(&item.rain) + OwmPrecipitation::window_mm(&item.snow);
                ForecastSample {
                    timestamp: DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now),
                    temperature_celsius: dec(item.main.temp),
                    humidity_percent: item.main.humidity,
                    precipitation_mm: dec(precipitation),
                    description: item
                        .weather
                        .first()
                        .map(|w| w.description.clone())
                        .unwrap_or_default(),
                    wind_speed_mps: dec(item.wind.speed),
                }
            })
            .collect();

        Ok(CityForecast {
            city_name: data.city.name,
            timezone_offset_seconds: data.city.timezone,
            samples,
        })
    }

    /// Resolve coordinates to a place name. `None` when the provider has
    /// no entry for the point.
    pub async fn reverse_geocode(&self, coords: &GpsCoordinates) -> AppResult<Option<String>> {
        let url = format!("{}/reverse", self.geo_url);
        let location = Location::Coordinates(coords.clone());
        let places: Vec<OwmGeoPlace> = self.get_json(&url, &location).await?;

        Ok(places.into_iter().next().map(|place| match place.country {
            Some(country) => format!("{}, {}", place.name, country),
            None => place.name,
        }))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, location: &Location) -> AppResult<T> {
        let response = self
            .client
            .get(url)
            .query(&location.query_pairs())
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("weather request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!(
                "weather for {}",
                location.describe()
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("weather API error: {} - {}", status, body);
            return Err(AppError::WeatherServiceUnavailable);
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("failed to parse weather response: {}", e)))
    }
}

fn dec(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or_default()
}
