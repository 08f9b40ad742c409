//! Farming sustainability scorer and suggestion generator

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::weather::{week_total_precipitation, DailyForecast, WeatherSnapshot};

/// Neutral starting score before any practice bonus or penalty.
pub const BASE_SCORE: i32 = 50;

/// Ceiling on the accumulated practice bonus.
pub const MAX_BONUS: i32 = 50;

/// Weekly rain total treated as a heavy-rain outlook, millimetres.
const HEAVY_RAIN_WEEK_MM: i32 = 20;

/// Current precipitation below this counts as a dry spell, millimetres.
const DRY_SPELL_MM: i32 = 1;

/// Wind speed above this counts as spray-drift risk, m/s.
const DRIFT_WIND_MPS: i32 = 8;

/// Farming practice survey, supplied entirely by form input.
///
/// Categorical fields are free text and matched case-insensitively;
/// unrecognized values earn no bonus. The optional numeric fields are
/// `None` when the submitted value was missing or unparseable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FarmingPractices {
    /// drip | sprinkler | flood
    pub irrigation: String,
    /// organic | integrated | chemical
    pub pesticide_use: String,
    /// no-till | reduced | conventional
    pub tillage: String,
    pub cover_crops: bool,
    pub organic_matter_percent: Option<f64>,
    pub rotation_diversity: Option<u32>,
    /// good | moderate | poor
    pub drainage: String,
}

impl FarmingPractices {
    fn irrigation(&self) -> String {
        self.irrigation.trim().to_lowercase()
    }

    fn pesticide(&self) -> String {
        self.pesticide_use.trim().to_lowercase()
    }

    fn tillage(&self) -> String {
        self.tillage.trim().to_lowercase()
    }

    fn drainage(&self) -> String {
        self.drainage.trim().to_lowercase()
    }
}

/// Scored sustainability assessment.
#[derive(Debug, Clone, Serialize)]
pub struct SustainabilityReport {
    /// Clamped to [0,100].
    pub score: i32,
    pub suggestions: Vec<String>,
}

/// Practice bonus before the cap: discrete categorical lookups plus
/// threshold bands on the optional numeric fields.
fn practice_bonus(practices: &FarmingPractices) -> i32 {
    let mut bonus = 0;

    bonus += match practices.irrigation().as_str() {
        "drip" => 10,
        "sprinkler" => 5,
        _ => 0,
    };
    bonus += match practices.pesticide().as_str() {
        "organic" | "none" => 10,
        "integrated" => 5,
        _ => 0,
    };
    bonus += match practices.tillage().as_str() {
        "no-till" | "no till" => 10,
        "reduced" => 5,
        _ => 0,
    };
    if practices.cover_crops {
        bonus += 10;
    }
    bonus += match practices.organic_matter_percent {
        Some(om) if om >= 5.0 => 10,
        Some(om) if om >= 3.0 => 5,
        _ => 0,
    };
    bonus += match practices.rotation_diversity {
        Some(n) if n >= 3 => 10,
        Some(2) => 5,
        _ => 0,
    };

    bonus
}

/// Penalties for poor practice meeting adverse weather. Zero without
/// weather context.
fn weather_penalty(
    practices: &FarmingPractices,
    current: Option<&WeatherSnapshot>,
    weekly: &BTreeMap<NaiveDate, DailyForecast>,
) -> i32 {
    let mut penalty = 0;

    if let Some(now) = current {
        if practices.irrigation() == "flood" && now.precipitation_mm < Decimal::from(DRY_SPELL_MM) {
            penalty += 5;
        }
        if practices.pesticide() == "chemical"
            && now.wind_speed_mps > Decimal::from(DRIFT_WIND_MPS)
        {
            penalty += 2;
        }
    }

    if practices.drainage() == "poor"
        && week_total_precipitation(weekly) > Decimal::from(HEAVY_RAIN_WEEK_MM)
    {
        penalty += 5;
    }

    penalty
}

/// Final score: base 50 plus the capped bonus, minus weather penalties,
/// clamped to [0,100].
pub fn sustainability_score(
    practices: &FarmingPractices,
    current: Option<&WeatherSnapshot>,
    weekly: &BTreeMap<NaiveDate, DailyForecast>,
) -> i32 {
    let bonus = practice_bonus(practices).min(MAX_BONUS);
    let penalty = weather_penalty(practices, current, weekly);
    (BASE_SCORE + bonus - penalty).clamp(0, 100)
}

/// Second pass over the same rule table, rendering prose instead of
/// points. Each suggestion is appended at most once and gated on both the
/// score band and the practice/weather condition that would earn it.
pub fn sustainability_suggestions(
    practices: &FarmingPractices,
    score: i32,
    current: Option<&WeatherSnapshot>,
    weekly: &BTreeMap<NaiveDate, DailyForecast>,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if score < 85 && practices.irrigation() != "drip" {
        suggestions.push("Switch to drip irrigation to cut water use.".to_string());
    }
    if score < 80 && practices.pesticide() == "chemical" {
        suggestions
            .push("Adopt integrated pest management to reduce chemical load.".to_string());
    }
    if score < 80 && practices.tillage() == "conventional" {
        suggestions.push("Move to reduced or no-till to protect soil structure.".to_string());
    }
    if score < 75 && !practices.cover_crops {
        suggestions
            .push("Plant cover crops in the off season to build organic matter.".to_string());
    }
    if score < 70 {
        match practices.organic_matter_percent {
            None => suggestions.push(
                "Provide an organic matter percentage so the score can reflect it.".to_string(),
            ),
            Some(om) if om < 3.0 => suggestions
                .push("Add compost or manure to raise organic matter above 3%.".to_string()),
            _ => {}
        }
        match practices.rotation_diversity {
            None => suggestions.push(
                "Provide a rotation diversity count so the score can reflect it.".to_string(),
            ),
            Some(n) if n < 2 => suggestions
                .push("Rotate at least two crop families to break pest cycles.".to_string()),
            _ => {}
        }
    }
    if score < 60 && practices.drainage() == "poor" {
        suggestions.push("Improve field drainage before the next heavy rain.".to_string());
    }

    if score < 85 {
        if let Some(now) = current {
            if practices.irrigation() == "flood"
                && now.precipitation_mm < Decimal::from(DRY_SPELL_MM)
            {
                suggestions.push(
                    "Flood irrigation during a dry spell wastes water; schedule by soil moisture."
                        .to_string(),
                );
            }
            if practices.pesticide() == "chemical"
                && now.wind_speed_mps > Decimal::from(DRIFT_WIND_MPS)
            {
                suggestions
                    .push("Hold chemical sprays until the wind drops below 8 m/s.".to_string());
            }
        }
        if practices.drainage() == "poor"
            && week_total_precipitation(weekly) > Decimal::from(HEAVY_RAIN_WEEK_MM)
        {
            suggestions.push(
                "Heavy rain is forecast; open drainage channels in waterlogged fields now."
                    .to_string(),
            );
        }
    }

    suggestions
}

/// Score the practices and derive the suggestion list in one pass.
pub fn assess_sustainability(
    practices: &FarmingPractices,
    current: Option<&WeatherSnapshot>,
    weekly: &BTreeMap<NaiveDate, DailyForecast>,
) -> SustainabilityReport {
    let score = sustainability_score(practices, current, weekly);
    let suggestions = sustainability_suggestions(practices, score, current, weekly);
    SustainabilityReport { score, suggestions }
}
