//! Deterministic synthetic forecast generation
//!
//! Last-resort fallback when the network is exhausted and no cache record
//! exists. Output is a pure function of the location code and the calendar
//! day, so repeated calls during an outage return identical data and the UI
//! stays stable.

use chrono::{Days, NaiveDate, Utc};

use crate::models::{
    ForecastEntry, Location, MarineConditions, WaveCategory, WeatherSnapshot,
};

const WIND_DIRECTIONS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Ordered from calm to severe
const WEATHER_OPTIONS: [&str; 7] = [
    "Cerah",
    "Cerah Berawan",
    "Berawan",
    "Hujan Ringan",
    "Hujan Sedang",
    "Hujan Lebat",
    "Badai",
];

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Generates plausible tropical-coastal forecasts seeded by the location code.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticGenerator;

impl SyntheticGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Seven daily entries starting today, plus a fixed marine block.
    pub fn generate(&self, location_code: &str) -> WeatherSnapshot {
        self.generate_for_day(location_code, Utc::now().date_naive())
    }

    /// Deterministic for a given `(location_code, start_day)` pair. Entries
    /// are anchored at midnight UTC so output is byte-identical within a
    /// calendar day.
    pub fn generate_for_day(&self, location_code: &str, start_day: NaiveDate) -> WeatherSnapshot {
        let seed: f64 = location_code.chars().map(|c| c as u32).sum::<u32>() as f64;
        let rand = |n: f64| ((seed + n).sin() * 10000.0).abs().fract();

        // Tropical baseline 26-31 °C, fixed per location
        let base_temp = 26.0 + (rand(1.0) * 6.0).floor();

        let forecasts = (0..7u64)
            .map(|i| {
                let n = i as f64;
                let day = start_day.checked_add_days(Days::new(i)).unwrap_or(start_day);
                let direction_idx = ((rand(n + 5.0) * 16.0) as usize).min(15);
                let weather_idx = ((rand(n + 6.0) * 7.0) as usize).min(6);

                ForecastEntry {
                    datetime: format!("{}T00:00:00Z", day),
                    temperature: Some(round1(base_temp + (rand(n + 2.0) * 6.0 - 3.0))),
                    humidity: Some((60.0 + rand(n + 3.0) * 30.0).round()),
                    weather: Some(WEATHER_OPTIONS[weather_idx].to_string()),
                    wind_speed: Some(round1(1.0 + rand(n + 4.0) * 10.0)),
                    wind_direction: Some(WIND_DIRECTIONS[direction_idx].to_string()),
                    extra: serde_json::Map::new(),
                }
            })
            .collect();

        WeatherSnapshot {
            location: Location {
                code: location_code.to_string(),
                city: Some(location_code.to_string()),
                ..Default::default()
            },
            forecasts,
            marine: Some(MarineConditions {
                wave_height_m: round1(0.5 + rand(10.0) * 3.0),
                wave_category: WaveCategory::Rendah,
                wind_speed_ms: round1(2.0 + rand(11.0) * 8.0),
                visibility: Some("Baik".to_string()),
                currents: None,
                tide: None,
                warnings: Vec::new(),
            }),
        }
    }
}
