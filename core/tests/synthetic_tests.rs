//! Synthetic fallback generator tests
//!
//! The generator must be a pure function of `(location_code, calendar day)`
//! and must always produce plausible tropical-coastal values.

use chrono::NaiveDate;
use proptest::prelude::*;

use cuacalaut_core::models::WaveCategory;
use cuacalaut_core::services::SyntheticGenerator;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

#[test]
fn test_same_code_same_day_is_identical() {
    let generator = SyntheticGenerator::new();
    let first = generator.generate_for_day("3171010001", day());
    let second = generator.generate_for_day("3171010001", day());
    assert_eq!(first, second);
}

#[test]
fn test_seven_daily_entries_from_start_day() {
    let snapshot = SyntheticGenerator::new().generate_for_day("3171010001", day());
    assert_eq!(snapshot.forecasts.len(), 7);
    assert_eq!(snapshot.forecasts[0].datetime, "2024-06-01T00:00:00Z");
    assert_eq!(snapshot.forecasts[6].datetime, "2024-06-07T00:00:00Z");
}

#[test]
fn test_different_codes_differ() {
    let generator = SyntheticGenerator::new();
    let a = generator.generate_for_day("3171010001", day());
    let b = generator.generate_for_day("3573010001", day());
    assert_ne!(a.forecasts, b.forecasts);
}

#[test]
fn test_marine_block_is_fixed_shape() {
    let snapshot = SyntheticGenerator::new().generate_for_day("3171010001", day());
    let marine = snapshot.marine.unwrap();
    assert_eq!(marine.wave_category, WaveCategory::Rendah);
    assert_eq!(marine.visibility.as_deref(), Some("Baik"));
    assert!(marine.warnings.is_empty());
    assert!(marine.wave_height_m >= 0.5 && marine.wave_height_m <= 3.5);
    assert!(marine.wind_speed_ms >= 2.0 && marine.wind_speed_ms <= 10.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Determinism holds for arbitrary codes.
    #[test]
    fn prop_deterministic_per_code(code in "[0-9]{5,12}") {
        let generator = SyntheticGenerator::new();
        prop_assert_eq!(
            generator.generate_for_day(&code, day()),
            generator.generate_for_day(&code, day())
        );
    }

    /// Generated values stay inside the tropical-coastal envelope.
    #[test]
    fn prop_values_in_plausible_ranges(code in "[0-9A-Za-z]{1,16}") {
        let snapshot = SyntheticGenerator::new().generate_for_day(&code, day());
        prop_assert_eq!(snapshot.forecasts.len(), 7);

        for entry in &snapshot.forecasts {
            let temperature = entry.temperature.unwrap();
            // baseline 26-31 °C with a ±3 °C swing
            prop_assert!((23.0..=35.0).contains(&temperature));

            let humidity = entry.humidity.unwrap();
            prop_assert!((60.0..=90.0).contains(&humidity));

            let wind = entry.wind_speed.unwrap();
            prop_assert!((1.0..=11.0).contains(&wind));

            prop_assert!(entry.weather.is_some());
            prop_assert!(entry.wind_direction.is_some());
            prop_assert!(entry.parsed_datetime().is_some());
        }
    }

    /// Wave category classification never decreases as height grows.
    #[test]
    fn prop_wave_category_monotonic(a in 0.0f64..8.0, b in 0.0f64..8.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(WaveCategory::from_height(low) <= WaveCategory::from_height(high));
    }
}
