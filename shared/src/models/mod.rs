//! Domain models and advisory rule engines

pub mod advice;
pub mod soil;
pub mod sustainability;
pub mod weather;

pub use advice::{advise_for_crop, CropAdvice};
pub use soil::{assess_soil, SoilHealthStatus, SoilReport, SoilSample};
pub use sustainability::{assess_sustainability, FarmingPractices, SustainabilityReport};
pub use weather::{
    aggregate_daily, local_date, upcoming_week, DailyForecast, ForecastSample, WeatherSnapshot,
};
