//! Canonical data model for forecasts, marine conditions and alerts
//!
//! Upstream payloads arrive in several naming conventions; everything in this
//! module is the normalized shape the rest of the system works with.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A forecast target, identified by its opaque administrative-area code.
///
/// The code is the sole cache and rate-limit partition key; the human-readable
/// names are informational only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
}

/// One time-sliced weather observation or prediction.
///
/// All meteorological fields are optional; unknown upstream fields are kept in
/// `extra` rather than dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEntry {
    /// ISO-8601 timestamp, always parseable after normalization
    pub datetime: String,
    /// Temperature in °C
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Relative humidity in %
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    /// Free-text weather description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    /// Wind speed in m/s
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    /// Compass point or degrees, kept as text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<String>,
    /// Upstream fields with no canonical counterpart
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ForecastEntry {
    /// Parse the entry's datetime, accepting RFC 3339 and the upstream
    /// `YYYY-MM-DD HH:MM:SS` local form (treated as UTC).
    pub fn parsed_datetime(&self) -> Option<DateTime<Utc>> {
        parse_datetime(&self.datetime)
    }
}

/// Parse a forecast timestamp in either supported form.
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    None
}

/// Wave height classification used by BMKG maritime forecasts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum WaveCategory {
    Tenang,
    Rendah,
    Sedang,
    Tinggi,
    #[serde(rename = "Sangat Tinggi")]
    SangatTinggi,
}

impl WaveCategory {
    /// Classify a wave height in meters. Breakpoints are half-open: a height
    /// exactly at a boundary falls into the higher category.
    pub fn from_height(height_m: f64) -> Self {
        if height_m < 0.5 {
            WaveCategory::Tenang
        } else if height_m < 1.25 {
            WaveCategory::Rendah
        } else if height_m < 2.5 {
            WaveCategory::Sedang
        } else if height_m < 4.0 {
            WaveCategory::Tinggi
        } else {
            WaveCategory::SangatTinggi
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WaveCategory::Tenang => "Tenang",
            WaveCategory::Rendah => "Rendah",
            WaveCategory::Sedang => "Sedang",
            WaveCategory::Tinggi => "Tinggi",
            WaveCategory::SangatTinggi => "Sangat Tinggi",
        }
    }
}

/// Current speed and direction
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Currents {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

/// Next high/low tide timestamps (ISO-8601)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tide {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_high: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_low: Option<String>,
}

/// Marine conditions for a coastal point
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarineConditions {
    pub wave_height_m: f64,
    pub wave_category: WaveCategory,
    pub wind_speed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currents: Option<Currents>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tide: Option<Tide>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Aggregate returned to consumers. Constructed fresh on each
/// fetch-or-fallback cycle and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub forecasts: Vec<ForecastEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marine: Option<MarineConditions>,
}

/// Envelope persisted by the cache: payload plus write time in epoch-ms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheRecord<T> {
    pub data: T,
    pub timestamp: i64,
}

/// Alert severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Critical,
    Warning,
}

/// A threshold-crossing alert, handed to the persistence and notification
/// collaborators and never read back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub id: Uuid,
    pub city_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
    pub level: AlertLevel,
    pub message: String,
    pub wave_height_m: f64,
    pub wind_speed_ms: f64,
    pub created_at: DateTime<Utc>,
}
