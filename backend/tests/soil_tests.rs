//! Soil health rule engine tests
//!
//! Covers the six threshold checks, the score-to-status bands, and the
//! fixed advisory sentences.

use proptest::prelude::*;

use shared::models::soil::{
    assess_soil, classify_soil, score_soil, suggestion_for, SoilHealthStatus, SoilSample,
};

/// Sample that passes every threshold check.
fn healthy_sample() -> SoilSample {
    SoilSample {
        ph: 6.5,
        nitrogen: 90.0,
        phosphorus: 40.0,
        potassium: 160.0,
        organic_carbon: 0.7,
        moisture: 30.0,
    }
}

/// Sample that fails every threshold check.
fn depleted_sample() -> SoilSample {
    SoilSample {
        ph: 4.0,
        nitrogen: 10.0,
        phosphorus: 5.0,
        potassium: 40.0,
        organic_carbon: 0.1,
        moisture: 5.0,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn perfect_sample_scores_six_and_is_good() {
        let report = assess_soil(&healthy_sample());
        assert_eq!(report.score, 6);
        assert_eq!(report.status, SoilHealthStatus::Good);
        assert_eq!(
            report.suggestion,
            "Maintain current practices and test soil quarterly."
        );
    }

    #[test]
    fn depleted_sample_scores_zero_and_is_poor() {
        let report = assess_soil(&depleted_sample());
        assert_eq!(report.score, 0);
        assert_eq!(report.status, SoilHealthStatus::Poor);
        assert_eq!(
            report.suggestion,
            "Add compost, reduce chemical use, rotate with legumes."
        );
    }

    #[test]
    fn status_bands_at_score_boundaries() {
        assert_eq!(classify_soil(0), SoilHealthStatus::Poor);
        assert_eq!(classify_soil(2), SoilHealthStatus::Poor);
        assert_eq!(classify_soil(3), SoilHealthStatus::Moderate);
        assert_eq!(classify_soil(4), SoilHealthStatus::Moderate);
        assert_eq!(classify_soil(5), SoilHealthStatus::Good);
        assert_eq!(classify_soil(6), SoilHealthStatus::Good);
    }

    #[test]
    fn moderate_status_gets_monitoring_suggestion() {
        assert_eq!(
            suggestion_for(SoilHealthStatus::Moderate),
            "Monitor nitrogen and organic content, improve drainage."
        );
    }

    #[test]
    fn ph_range_is_inclusive_at_both_ends() {
        let mut sample = healthy_sample();
        sample.ph = 6.0;
        assert_eq!(score_soil(&sample), 6);
        sample.ph = 7.5;
        assert_eq!(score_soil(&sample), 6);
        sample.ph = 5.99;
        assert_eq!(score_soil(&sample), 5);
        sample.ph = 7.51;
        assert_eq!(score_soil(&sample), 5);
    }

    #[test]
    fn nutrient_thresholds_are_strict() {
        // Exactly at the cut counts as failing for N, P, and K.
        let mut sample = healthy_sample();
        sample.nitrogen = 80.0;
        sample.phosphorus = 30.0;
        sample.potassium = 150.0;
        assert_eq!(score_soil(&sample), 3);
    }

    #[test]
    fn organic_carbon_and_moisture_bands_are_inclusive() {
        let mut sample = healthy_sample();
        sample.organic_carbon = 0.5;
        sample.moisture = 20.0;
        assert_eq!(score_soil(&sample), 6);
        sample.organic_carbon = 1.0;
        sample.moisture = 40.0;
        assert_eq!(score_soil(&sample), 6);
        sample.organic_carbon = 1.01;
        sample.moisture = 40.01;
        assert_eq!(score_soil(&sample), 4);
    }

    #[test]
    fn one_failing_check_drops_one_point() {
        let mut sample = healthy_sample();
        sample.moisture = 50.0;
        let report = assess_soil(&sample);
        assert_eq!(report.score, 5);
        assert_eq!(report.status, SoilHealthStatus::Good);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;

    fn sample_strategy() -> impl Strategy<Value = SoilSample> {
        (
            0.0..14.0f64,
            0.0..300.0f64,
            0.0..150.0f64,
            0.0..500.0f64,
            0.0..5.0f64,
            0.0..100.0f64,
        )
            .prop_map(
                |(ph, nitrogen, phosphorus, potassium, organic_carbon, moisture)| SoilSample {
                    ph,
                    nitrogen,
                    phosphorus,
                    potassium,
                    organic_carbon,
                    moisture,
                },
            )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// The score never leaves [0,6].
        #[test]
        fn score_stays_in_range(sample in sample_strategy()) {
            prop_assert!(score_soil(&sample) <= 6);
        }

        /// Fixing one failing measurement never lowers the score.
        #[test]
        fn improving_nitrogen_is_monotone(sample in sample_strategy()) {
            let before = score_soil(&sample);
            let mut improved = sample;
            improved.nitrogen = 100.0;
            prop_assert!(score_soil(&improved) >= before);
        }

        /// Status always matches the score band.
        #[test]
        fn status_matches_score_band(sample in sample_strategy()) {
            let report = assess_soil(&sample);
            let expected = match report.score {
                5..=6 => SoilHealthStatus::Good,
                3..=4 => SoilHealthStatus::Moderate,
                _ => SoilHealthStatus::Poor,
            };
            prop_assert_eq!(report.status, expected);
        }
    }
}
