//! Soil health rule engine

use serde::{Deserialize, Serialize};

/// Lab measurements for one soil sample.
///
/// No valid range is declared; out-of-range values simply fail every
/// threshold check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SoilSample {
    pub ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub organic_carbon: f64,
    pub moisture: f64,
}

/// Soil health classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SoilHealthStatus {
    /// Score 5-6
    Good,
    /// Score 3-4
    Moderate,
    /// Score 0-2
    Poor,
}

impl std::fmt::Display for SoilHealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoilHealthStatus::Good => write!(f, "Good"),
            SoilHealthStatus::Moderate => write!(f, "Moderate"),
            SoilHealthStatus::Poor => write!(f, "Poor"),
        }
    }
}

/// Scored soil assessment with its advisory sentence
#[derive(Debug, Clone, Serialize)]
pub struct SoilReport {
    pub score: u8,
    pub status: SoilHealthStatus,
    pub suggestion: &'static str,
}

/// Score a sample: six independent threshold checks, one point each.
pub fn score_soil(sample: &SoilSample) -> u8 {
    let checks = [
        (6.0..=7.5).contains(&sample.ph),
        sample.nitrogen > 80.0,
        sample.phosphorus > 30.0,
        sample.potassium > 150.0,
        (0.5..=1.0).contains(&sample.organic_carbon),
        (20.0..=40.0).contains(&sample.moisture),
    ];
    checks.iter().filter(|&&passed| passed).count() as u8
}

/// Classify a score in [0,6] into a health status.
pub fn classify_soil(score: u8) -> SoilHealthStatus {
    match score {
        5..=6 => SoilHealthStatus::Good,
        3..=4 => SoilHealthStatus::Moderate,
        _ => SoilHealthStatus::Poor,
    }
}

/// Fixed advisory sentence for a status.
pub fn suggestion_for(status: SoilHealthStatus) -> &'static str {
    match status {
        SoilHealthStatus::Poor => "Add compost, reduce chemical use, rotate with legumes.",
        SoilHealthStatus::Moderate => "Monitor nitrogen and organic content, improve drainage.",
        SoilHealthStatus::Good => "Maintain current practices and test soil quarterly.",
    }
}

/// Score, classify, and attach the advisory sentence.
pub fn assess_soil(sample: &SoilSample) -> SoilReport {
    let score = score_soil(sample);
    let status = classify_soil(score);
    SoilReport {
        score,
        status,
        suggestion: suggestion_for(status),
    }
}
