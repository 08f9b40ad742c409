//! Weather domain types and the daily forecast aggregator

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of calendar days covered by the weekly outlook.
pub const FORECAST_DAYS: i64 = 7;

/// Current conditions at a location, derived per request and discarded
/// after the response is rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub observed_at: DateTime<Utc>,
    pub temperature_celsius: Decimal,
    pub humidity_percent: i32,
    /// Rain plus snow over the last hour, millimetres.
    pub precipitation_mm: Decimal,
    pub description: String,
    pub wind_speed_mps: Decimal,
}

/// One 3-hour forecast sample as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature_celsius: Decimal,
    pub humidity_percent: i32,
    /// Rain plus snow over the 3-hour window, millimetres.
    pub precipitation_mm: Decimal,
    pub description: String,
    pub wind_speed_mps: Decimal,
}

/// Daily summary reduced from a day's 3-hour samples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temp_min_celsius: Decimal,
    pub temp_max_celsius: Decimal,
    pub humidity_avg_percent: Decimal,
    pub precipitation_total_mm: Decimal,
    /// Most frequent description over the day's samples. Ties go to the
    /// description encountered first in sample order.
    pub description: String,
    pub wind_avg_mps: Decimal,
}

/// Calendar date of `timestamp` at the location's UTC offset.
pub fn local_date(timestamp: DateTime<Utc>, offset_seconds: i32) -> NaiveDate {
    timestamp.with_timezone(&utc_offset(offset_seconds)).date_naive()
}

fn utc_offset(offset_seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(offset_seconds).unwrap_or_else(|| Utc.fix())
}

/// Group 3-hour samples into per-day summaries, keyed chronologically.
///
/// Days are cut at midnight in the location's timezone, taken from the
/// provider's reported UTC offset. Dates with no samples are absent from
/// the result, never zero-filled.
pub fn aggregate_daily(
    samples: &[ForecastSample],
    offset_seconds: i32,
) -> BTreeMap<NaiveDate, DailyForecast> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

    for sample in samples {
        let date = local_date(sample.timestamp, offset_seconds);
        days.entry(date).or_default().add(sample);
    }

    days.into_iter()
        .map(|(date, acc)| (date, acc.finish(date)))
        .collect()
}

/// Restrict a daily mapping to the window of [`FORECAST_DAYS`] calendar
/// dates beginning at `today`, preserving chronological order.
pub fn upcoming_week(
    daily: &BTreeMap<NaiveDate, DailyForecast>,
    today: NaiveDate,
) -> BTreeMap<NaiveDate, DailyForecast> {
    let end = today + Duration::days(FORECAST_DAYS);
    daily
        .range(today..end)
        .map(|(date, forecast)| (*date, forecast.clone()))
        .collect()
}

/// Whether any daily description in the window mentions `needle`
/// (case-insensitive).
pub fn week_mentions(daily: &BTreeMap<NaiveDate, DailyForecast>, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    daily
        .values()
        .any(|day| day.description.to_lowercase().contains(&needle))
}

/// Total precipitation over the window, millimetres.
pub fn week_total_precipitation(daily: &BTreeMap<NaiveDate, DailyForecast>) -> Decimal {
    daily.values().map(|day| day.precipitation_total_mm).sum()
}

/// Running per-day aggregation state.
#[derive(Debug, Default)]
struct DayAccumulator {
    count: u32,
    temp_min: Option<Decimal>,
    temp_max: Option<Decimal>,
    humidity_sum: i64,
    precipitation_sum: Decimal,
    wind_sum: Decimal,
    /// Descriptions with counts, in order of first appearance.
    descriptions: Vec<(String, u32)>,
}

impl DayAccumulator {
    fn add(&mut self, sample: &ForecastSample) {
        self.count += 1;
        self.temp_min = Some(match self.temp_min {
            Some(min) => min.min(sample.temperature_celsius),
            None => sample.temperature_celsius,
        });
        self.temp_max = Some(match self.temp_max {
            Some(max) => max.max(sample.temperature_celsius),
            None => sample.temperature_celsius,
        });
        self.humidity_sum += i64::from(sample.humidity_percent);
        self.precipitation_sum += sample.precipitation_mm;
        self.wind_sum += sample.wind_speed_mps;

        match self
            .descriptions
            .iter_mut()
            .find(|(desc, _)| *desc == sample.description)
        {
            Some((_, count)) => *count += 1,
            None => self.descriptions.push((sample.description.clone(), 1)),
        }
    }

    fn finish(self, date: NaiveDate) -> DailyForecast {
        let count = Decimal::from(self.count.max(1));

        // First-encountered description wins ties, so only a strictly
        // greater count displaces the current mode.
        let mut description = String::new();
        let mut best = 0u32;
        for (desc, seen) in &self.descriptions {
            if *seen > best {
                best = *seen;
                description = desc.clone();
            }
        }

        DailyForecast {
            date,
            temp_min_celsius: self.temp_min.unwrap_or_default(),
            temp_max_celsius: self.temp_max.unwrap_or_default(),
            humidity_avg_percent: Decimal::from(self.humidity_sum) / count,
            precipitation_total_mm: self.precipitation_sum,
            description,
            wind_avg_mps: self.wind_sum / count,
        }
    }
}
