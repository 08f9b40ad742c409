//! Crop-specific weather advisory decision table

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::weather::{week_mentions, week_total_precipitation, DailyForecast, WeatherSnapshot};

/// Ordered do/don't advisory lists for a crop under given weather.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CropAdvice {
    pub dos: Vec<String>,
    pub donts: Vec<String>,
}

impl CropAdvice {
    fn advise(&mut self, text: &str) {
        self.dos.push(text.to_string());
    }

    fn warn(&mut self, text: &str) {
        self.donts.push(text.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.dos.is_empty() && self.donts.is_empty()
    }
}

/// Build advice for a crop name (free text, case-insensitive) from current
/// conditions and the weekly outlook.
///
/// Generic advice is appended first, then the per-crop additions. An
/// unrecognized crop name receives only the generic advice; it is not an
/// error.
pub fn advise_for_crop(
    crop: &str,
    current: Option<&WeatherSnapshot>,
    weekly: &BTreeMap<NaiveDate, DailyForecast>,
) -> CropAdvice {
    let mut advice = CropAdvice::default();

    let temp = current.map(|w| w.temperature_celsius);
    let week_rain = week_total_precipitation(weekly);

    let hot = temp.map(|t| t > Decimal::from(35)).unwrap_or(false);
    let cold = temp.map(|t| t < Decimal::from(10)).unwrap_or(false);
    let rainy = current
        .map(|w| w.precipitation_mm > Decimal::from(5))
        .unwrap_or(false)
        || week_mentions(weekly, "rain");
    let windy = current
        .map(|w| {
            w.wind_speed_mps > Decimal::from(30) || w.description.to_lowercase().contains("wind")
        })
        .unwrap_or(false)
        || week_mentions(weekly, "wind");

    if hot {
        advice.advise("Irrigate in the early morning or late evening to limit evaporation.");
        advice.warn("Do not transplant seedlings during peak afternoon heat.");
    }
    if cold {
        advice.advise("Protect young plants with mulch or row covers against the cold.");
        advice.warn("Do not irrigate late in the evening when frost is possible.");
    }
    if rainy {
        advice.advise("Clear field drains and bunds before the rain arrives.");
        advice.warn("Do not apply fertiliser or spray just before rain.");
    }
    if windy {
        advice.advise("Stake or earth up tall crops before the wind picks up.");
        advice.warn("Do not spray pesticides in strong wind.");
    }

    match crop.trim().to_lowercase().as_str() {
        "rice" => {
            if week_rain < Decimal::from(10) {
                advice.advise("Keep paddies flooded to at least 5 cm; the week ahead looks dry.");
            }
            if temp.map(|t| t < Decimal::from(15)).unwrap_or(false) {
                advice.warn("Do not sow rice while temperatures stay below 15°C.");
            }
        }
        "wheat" => {
            if temp.map(|t| t > Decimal::from(30)).unwrap_or(false) {
                advice.advise("Plan an extra irrigation; wheat loses grain weight above 30°C.");
            }
            if rainy {
                advice.warn("Do not leave harvested wheat uncovered with rain in the forecast.");
            }
        }
        "maize" | "corn" => {
            if temp.map(|t| t > Decimal::from(32)).unwrap_or(false) {
                advice.advise("Irrigate at silking; maize is most heat-sensitive above 32°C.");
            }
            if windy {
                advice.warn("Do not side-dress nitrogen ahead of strong wind.");
            }
        }
        "barley" => {
            if week_rain > Decimal::from(25) {
                advice.warn("Do not delay barley harvest; over 25 mm of rain is due this week.");
            }
            if temp.map(|t| t > Decimal::from(30)).unwrap_or(false) {
                advice.advise("Give barley a light irrigation during grain fill in this heat.");
            }
        }
        "cotton" => {
            if temp.map(|t| t < Decimal::from(15)).unwrap_or(false) {
                advice.advise("Delay cotton sowing until soils warm past 15°C.");
            }
            if rainy {
                advice.warn("Do not pick cotton until the canopy has dried after rain.");
            }
        }
        "sugarcane" | "cane" => {
            if temp.map(|t| t > Decimal::from(38)).unwrap_or(false) {
                advice.advise("Mulch cane rows to hold soil moisture in this heat.");
            }
            if week_rain > Decimal::from(40) {
                advice.warn("Do not apply urea before heavy rain; it will leach away.");
            }
        }
        "potato" => {
            if temp.map(|t| t > Decimal::from(28)).unwrap_or(false) {
                advice.advise("Hill up and irrigate; tuber growth stalls above 28°C.");
            }
            if week_rain > Decimal::from(20) {
                advice.warn("Do not irrigate; over 20 mm of rain is forecast and wet soil invites blight.");
            }
        }
        "tomato" => {
            if temp.map(|t| t > Decimal::from(35)).unwrap_or(false) {
                advice.advise("Shade tomato trusses; fruit set fails above 35°C.");
            }
            if rainy {
                advice.warn("Do not wet the foliage; rain already raises fungal pressure.");
            }
        }
        "carrot" => {
            if week_rain < Decimal::from(5) {
                advice.advise("Water carrot beds little and often through this dry spell.");
            }
            if temp.map(|t| t > Decimal::from(30)).unwrap_or(false) {
                advice.warn("Do not sow carrots now; germination is poor above 30°C.");
            }
        }
        "peas" => {
            if week_rain > Decimal::from(15) {
                advice.advise("Stake peas before the rain arrives.");
            }
            if temp.map(|t| t > Decimal::from(27)).unwrap_or(false) {
                advice.warn("Do not expect pod set to hold above 27°C; pick early.");
            }
        }
        // Anything else gets the generic advice only.
        _ => {}
    }

    advice
}
