//! Threshold-based marine safety alerts
//!
//! Batch-style evaluation: fetch marine conditions for a location (falling
//! back to the first forecast entry's wind speed), compare against fixed
//! thresholds, and hand emitted alerts to the persistence and notification
//! collaborators. Both side effects are best-effort; a failed write never
//! blocks the notification and vice versa.

use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::external::{
    AlertStore, NotificationDispatcher, NotificationMessage, NotificationPriority,
};
use crate::models::{AlertLevel, AlertRecord};
use crate::services::weather::WeatherService;

/// Wave height at which going to sea is discouraged, meters.
pub const WAVE_DANGER_M: f64 = 2.5;
/// Wave height of the extreme warning, meters.
pub const WAVE_EXTREME_M: f64 = 4.0;
/// Wind danger threshold. Documented upstream as km/h while the marine feed
/// reports m/s; the comparison is kept literal until the product rule is
/// clarified.
pub const WIND_DANGER: f64 = 40.0;

const ALERTS_COLLECTION: &str = "alerts";

/// Evaluates safety thresholds for configured coastal locations.
pub struct AlertEvaluator {
    weather: Arc<WeatherService>,
    store: Arc<dyn AlertStore>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    city_coords: HashMap<String, (f64, f64)>,
}

impl AlertEvaluator {
    pub fn new(
        weather: Arc<WeatherService>,
        store: Arc<dyn AlertStore>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        // Seed cities; hosts register the rest via `with_coords`
        let mut city_coords = HashMap::new();
        city_coords.insert("3171010001".to_string(), (-6.17511, 106.865039)); // Jakarta Pusat
        city_coords.insert("3573010001".to_string(), (-7.257472, 112.752088)); // Surabaya

        Self {
            weather,
            store,
            dispatcher,
            city_coords,
        }
    }

    /// Register coordinates for a city code so marine conditions can be
    /// looked up for it.
    pub fn with_coords(mut self, code: impl Into<String>, lat: f64, lon: f64) -> Self {
        self.city_coords.insert(code.into(), (lat, lon));
        self
    }

    /// Evaluate one location and emit any threshold alerts. Returns the
    /// (possibly empty) emitted list, or `None` when the evaluation had no
    /// usable data and was skipped.
    pub async fn evaluate_and_emit(
        &self,
        city_code: &str,
        city_name: Option<&str>,
    ) -> Option<Vec<AlertRecord>> {
        let mut wave_height = 0.0f64;
        let mut wind_speed = 0.0f64;

        if let Some(&(lat, lon)) = self.city_coords.get(city_code) {
            match self.weather.get_marine_conditions(lat, lon).await {
                Ok(marine) => {
                    wave_height = marine.wave_height_m;
                    wind_speed = marine.wind_speed_ms;
                }
                Err(e) => {
                    tracing::warn!(city_code, error = %e, "marine conditions unavailable");
                }
            }
        }

        // Without marine wind, fall back to the first forecast entry
        if wind_speed == 0.0 {
            match self.weather.get_weather_by_location(city_code).await {
                Ok(weather) => {
                    if let Some(first) = weather.forecasts.first() {
                        wind_speed = first.wind_speed.unwrap_or(0.0);
                    }
                }
                Err(e) => {
                    tracing::warn!(city_code, error = %e, "alert evaluation skipped");
                    return None;
                }
            }
        }

        let display_name = city_name.unwrap_or(city_code);
        let mut pending: Vec<(AlertLevel, String)> = Vec::new();

        if wave_height >= WAVE_EXTREME_M {
            pending.push((
                AlertLevel::Critical,
                format!(
                    "EXTREME WAVE WARNING for {} - DO NOT GO TO SEA (H={}m)",
                    display_name, wave_height
                ),
            ));
        } else if wave_height >= WAVE_DANGER_M {
            pending.push((
                AlertLevel::Warning,
                format!(
                    "HIGH WAVES for {} - Exercise extreme caution (H={}m)",
                    display_name, wave_height
                ),
            ));
        }

        if wind_speed >= WIND_DANGER {
            pending.push((
                AlertLevel::Warning,
                format!(
                    "DANGEROUS WINDS for {} - Consider returning to port (V={} km/h)",
                    display_name, wind_speed
                ),
            ));
        }

        let mut emitted = Vec::with_capacity(pending.len());
        for (level, message) in pending {
            let record = AlertRecord {
                id: Uuid::new_v4(),
                city_code: city_code.to_string(),
                city_name: city_name.map(str::to_string),
                level,
                message,
                wave_height_m: wave_height,
                wind_speed_ms: wind_speed,
                created_at: chrono::Utc::now(),
            };

            if let Err(e) = self.store.append(ALERTS_COLLECTION, &record).await {
                tracing::warn!(city_code, error = %e, "failed to persist alert");
            }

            let critical = record.level == AlertLevel::Critical;
            let notification = NotificationMessage {
                title: if critical {
                    "CRITICAL WEATHER ALERT".to_string()
                } else {
                    "Marine Warning".to_string()
                },
                body: record.message.clone(),
                category: if critical { "critical" } else { "marine" }.to_string(),
                priority: if critical {
                    NotificationPriority::High
                } else {
                    NotificationPriority::Normal
                },
                data: json!({ "cityCode": city_code }),
            };
            if let Err(e) = self.dispatcher.send(notification).await {
                tracing::warn!(city_code, error = %e, "failed to send notification");
            }

            emitted.push(record);
        }

        Some(emitted)
    }
}
