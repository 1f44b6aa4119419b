//! Normalization of heterogeneous upstream payloads into the canonical schema
//!
//! Upstream data arrives either in the raw public-API shape (`t`, `hu`, `ws`,
//! `weather_desc`, `lokasi.desa`, …) or already partially normalized. Every
//! target field is filled from the first matching source name, preferring the
//! canonical English name over the localized/raw one. Missing fields stay
//! absent; unknown fields are preserved rather than dropped.

use serde_json::{Map, Value};

use crate::models::{
    parse_datetime, Currents, ForecastEntry, Location, MarineConditions, Tide, WaveCategory,
    WeatherSnapshot,
};

const ENTRY_SOURCE_KEYS: [&str; 14] = [
    "datetime",
    "local_datetime",
    "utc_datetime",
    "temperature",
    "t",
    "humidity",
    "hu",
    "weather",
    "weatherDescription",
    "weather_desc",
    "windSpeed",
    "ws",
    "windDirection",
    "wd",
];

/// First present, non-null value among `keys`, as text. Numbers are rendered
/// (wind direction may arrive in degrees).
fn str_field(raw: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        match raw.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => continue,
        }
    }
    None
}

/// First present, non-null value among `keys`, as a number. Numeric strings
/// are parsed.
fn num_field(raw: &Value, keys: &[&str]) -> Option<f64> {
    for key in keys {
        match raw.get(key) {
            Some(Value::Number(n)) => return n.as_f64(),
            Some(Value::String(s)) => {
                if let Ok(parsed) = s.parse::<f64>() {
                    return Some(parsed);
                }
            }
            _ => continue,
        }
    }
    None
}

fn string_list(raw: &Value, keys: &[&str]) -> Vec<String> {
    for key in keys {
        if let Some(Value::Array(items)) = raw.get(key) {
            return items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
        }
    }
    Vec::new()
}

/// Map one upstream forecast record into a canonical entry. Returns `None`
/// when no parseable datetime is present; datetime is the only required
/// field.
pub fn normalize_entry(raw: &Value) -> Option<ForecastEntry> {
    let datetime = str_field(raw, &["datetime", "local_datetime", "utc_datetime"])?;
    if parse_datetime(&datetime).is_none() {
        tracing::warn!(%datetime, "dropping forecast entry with unparseable datetime");
        return None;
    }

    let mut extra = Map::new();
    if let Value::Object(fields) = raw {
        for (key, value) in fields {
            if !ENTRY_SOURCE_KEYS.contains(&key.as_str()) {
                extra.insert(key.clone(), value.clone());
            }
        }
    }

    Some(ForecastEntry {
        datetime,
        temperature: num_field(raw, &["temperature", "t"]),
        humidity: num_field(raw, &["humidity", "hu"]),
        weather: str_field(raw, &["weather", "weatherDescription", "weather_desc"]),
        wind_speed: num_field(raw, &["windSpeed", "ws"]),
        wind_direction: str_field(raw, &["windDirection", "wd"]),
        extra,
    })
}

fn normalize_location(code: &str, raw: Option<&Value>) -> Location {
    let empty = Value::Null;
    let raw = raw.unwrap_or(&empty);
    Location {
        code: code.to_string(),
        village: str_field(raw, &["village", "desa"]),
        district: str_field(raw, &["district", "kecamatan"]),
        city: str_field(raw, &["city", "kota"]),
        province: str_field(raw, &["province", "provinsi"]),
    }
}

/// Map a full upstream forecast payload into a canonical snapshot. Entries
/// are ordered by non-decreasing datetime.
pub fn normalize_snapshot(location_code: &str, raw: &Value) -> WeatherSnapshot {
    let location = normalize_location(location_code, raw.get("lokasi").or_else(|| raw.get("location")));

    let mut dated: Vec<_> = raw
        .get("data")
        .or_else(|| raw.get("forecasts"))
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(normalize_entry)
                .filter_map(|entry| entry.parsed_datetime().map(|dt| (dt, entry)))
                .collect()
        })
        .unwrap_or_default();
    dated.sort_by_key(|(dt, _)| *dt);

    WeatherSnapshot {
        location,
        forecasts: dated.into_iter().map(|(_, entry)| entry).collect(),
        marine: raw.get("marine").map(normalize_marine),
    }
}

/// Map an upstream marine payload (`tinggi_gelombang`, `kecepatan_angin`, …)
/// into canonical marine conditions, deriving the wave category.
pub fn normalize_marine(raw: &Value) -> MarineConditions {
    let wave_height = num_field(raw, &["waveHeightM", "waveHeight", "tinggi_gelombang"])
        .unwrap_or(0.0);

    let currents = raw.get("arus").or_else(|| raw.get("currents")).map(|c| Currents {
        speed_ms: num_field(c, &["speedMs", "kecepatan"]),
        direction: str_field(c, &["direction", "arah"]),
    });

    let tide = raw
        .get("pasang_surut")
        .or_else(|| raw.get("tide"))
        .map(|t| Tide {
            next_high: str_field(t, &["nextHigh", "pasang_berikutnya"]),
            next_low: str_field(t, &["nextLow", "surut_berikutnya"]),
        });

    MarineConditions {
        wave_height_m: wave_height,
        wave_category: WaveCategory::from_height(wave_height),
        wind_speed_ms: num_field(raw, &["windSpeedMs", "windSpeed", "kecepatan_angin"])
            .unwrap_or(0.0),
        visibility: str_field(raw, &["visibility", "jarak_pandang"]),
        currents,
        tide,
        warnings: string_list(raw, &["warnings", "peringatan"]),
    }
}
