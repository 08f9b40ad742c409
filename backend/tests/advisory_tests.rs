//! Crop weather advisory tests
//!
//! Covers the generic weather rules, the per-crop additions, ordering,
//! and unknown-crop handling.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use shared::models::advice::advise_for_crop;
use shared::models::weather::{DailyForecast, WeatherSnapshot};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn snapshot(temp: &str, rain: &str, wind: &str, desc: &str) -> WeatherSnapshot {
    WeatherSnapshot {
        location_name: "Testville".to_string(),
        observed_at: Utc.with_ymd_and_hms(2026, 8, 10, 12, 0, 0).unwrap(),
        temperature_celsius: dec(temp),
        humidity_percent: 60,
        precipitation_mm: dec(rain),
        description: desc.to_string(),
        wind_speed_mps: dec(wind),
    }
}

fn mild() -> WeatherSnapshot {
    snapshot("22.0", "0.0", "3.0", "clear sky")
}

fn week_with(rain_mm: &str, desc: &str) -> BTreeMap<NaiveDate, DailyForecast> {
    let date = NaiveDate::from_ymd_opt(2026, 8, 11).unwrap();
    let mut week = BTreeMap::new();
    week.insert(
        date,
        DailyForecast {
            date,
            temp_min_celsius: dec("18.0"),
            temp_max_celsius: dec("26.0"),
            humidity_avg_percent: dec("60"),
            precipitation_total_mm: dec(rain_mm),
            description: desc.to_string(),
            wind_avg_mps: dec("3.0"),
        },
    );
    week
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn mild_weather_and_unknown_crop_yield_nothing() {
        let advice = advise_for_crop("dragonfruit", Some(&mild()), &week_with("12.0", "clear sky"));
        assert!(advice.is_empty());
    }

    #[test]
    fn unknown_crop_still_gets_generic_heat_advice() {
        let hot = snapshot("40.0", "0.0", "3.0", "clear sky");
        let advice = advise_for_crop("dragonfruit", Some(&hot), &week_with("12.0", "clear sky"));

        assert_eq!(advice.dos.len(), 1);
        assert_eq!(advice.donts.len(), 1);
        assert!(advice.dos[0].contains("early morning"));
        assert!(advice.donts[0].contains("peak afternoon heat"));
    }

    #[test]
    fn crop_name_matching_ignores_case_and_whitespace() {
        let hot = snapshot("33.0", "0.0", "3.0", "clear sky");
        let week = week_with("12.0", "clear sky");

        let lower = advise_for_crop("maize", Some(&hot), &week);
        let shouty = advise_for_crop("  MAIZE ", Some(&hot), &week);
        assert_eq!(lower.dos, shouty.dos);
        assert!(lower.dos.iter().any(|d| d.contains("silking")));
    }

    #[test]
    fn corn_is_an_alias_for_maize() {
        let hot = snapshot("33.0", "0.0", "3.0", "clear sky");
        let week = week_with("12.0", "clear sky");

        let maize = advise_for_crop("maize", Some(&hot), &week);
        let corn = advise_for_crop("corn", Some(&hot), &week);
        assert_eq!(maize.dos, corn.dos);
        assert_eq!(maize.donts, corn.donts);
    }

    #[test]
    fn generic_advice_precedes_crop_advice() {
        // Hot plus a dry week triggers both a generic and a rice rule.
        let hot = snapshot("38.0", "0.0", "3.0", "clear sky");
        let advice = advise_for_crop("rice", Some(&hot), &week_with("2.0", "clear sky"));

        assert_eq!(advice.dos.len(), 2);
        assert!(advice.dos[0].contains("early morning"));
        assert!(advice.dos[1].contains("paddies flooded"));
    }

    #[test]
    fn rain_in_forecast_description_counts_as_rainy() {
        let advice = advise_for_crop("wheat", Some(&mild()), &week_with("0.0", "light rain"));

        assert!(advice.dos.iter().any(|d| d.contains("drains")));
        assert!(advice
            .donts
            .iter()
            .any(|d| d.contains("harvested wheat uncovered")));
    }

    #[test]
    fn potato_rain_rule_uses_weekly_total() {
        let advice = advise_for_crop("potato", Some(&mild()), &week_with("25.0", "overcast clouds"));
        assert!(advice.donts.iter().any(|d| d.contains("blight")));
    }

    #[test]
    fn missing_current_weather_still_uses_the_outlook() {
        let advice = advise_for_crop("rice", None, &week_with("2.0", "clear sky"));
        assert!(advice.dos.iter().any(|d| d.contains("paddies flooded")));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;

    fn snapshot_strategy() -> impl Strategy<Value = WeatherSnapshot> {
        (-100i64..=500, 0i64..=200, 0i64..=400).prop_map(|(temp, rain, wind)| WeatherSnapshot {
            location_name: "Testville".to_string(),
            observed_at: Utc.with_ymd_and_hms(2026, 8, 10, 12, 0, 0).unwrap(),
            temperature_celsius: Decimal::new(temp, 1),
            humidity_percent: 60,
            precipitation_mm: Decimal::new(rain, 1),
            description: "clear sky".to_string(),
            wind_speed_mps: Decimal::new(wind, 1),
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// An unknown crop never receives more advice than the four
        /// generic weather rules can produce.
        #[test]
        fn unknown_crop_advice_is_bounded(current in snapshot_strategy()) {
            let advice = advise_for_crop("dragonfruit", Some(&current), &BTreeMap::new());
            prop_assert!(advice.dos.len() <= 4);
            prop_assert!(advice.donts.len() <= 4);
        }

        /// A known crop's advice always starts with the generic advice an
        /// unknown crop would get under the same weather.
        #[test]
        fn crop_advice_extends_generic_advice(current in snapshot_strategy()) {
            let week = week_with("2.0", "clear sky");
            let generic = advise_for_crop("dragonfruit", Some(&current), &week);
            let rice = advise_for_crop("rice", Some(&current), &week);
            prop_assert!(rice.dos.starts_with(&generic.dos));
            prop_assert!(rice.donts.starts_with(&generic.donts));
        }
    }
}
