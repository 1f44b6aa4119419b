//! Shared test doubles for the fetch and alert integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use cuacalaut_core::error::{CoreError, CoreResult};
use cuacalaut_core::external::{Connectivity, KeyValueStore, MemoryStore, WeatherApi};
use cuacalaut_core::models::{ForecastEntry, Location, WeatherSnapshot};
use cuacalaut_core::services::WeatherService;
use cuacalaut_core::Config;

/// Scripted upstream API: each endpoint either returns a fixed payload or
/// fails every call. Call counts are observable.
#[derive(Default)]
pub struct MockApi {
    forecast: Option<Value>,
    marine: Option<Value>,
    pub forecast_calls: AtomicUsize,
    pub marine_calls: AtomicUsize,
}

impl MockApi {
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn with_forecast(mut self, payload: Value) -> Self {
        self.forecast = Some(payload);
        self
    }

    pub fn with_marine(mut self, payload: Value) -> Self {
        self.marine = Some(payload);
        self
    }
}

#[async_trait]
impl WeatherApi for MockApi {
    async fn fetch_forecast(&self, _location_code: &str) -> CoreResult<Value> {
        self.forecast_calls.fetch_add(1, Ordering::SeqCst);
        match &self.forecast {
            Some(payload) => Ok(payload.clone()),
            None => Err(CoreError::ExternalService("scripted forecast failure".to_string())),
        }
    }

    async fn fetch_marine(&self, _lat: f64, _lon: f64) -> CoreResult<Value> {
        self.marine_calls.fetch_add(1, Ordering::SeqCst);
        match &self.marine {
            Some(payload) => Ok(payload.clone()),
            None => Err(CoreError::ExternalService("scripted marine failure".to_string())),
        }
    }
}

/// Connectivity pinned to a fixed state.
pub struct FixedConnectivity {
    connected: bool,
    tx: watch::Sender<bool>,
}

impl FixedConnectivity {
    pub fn new(connected: bool) -> Self {
        let (tx, _rx) = watch::channel(connected);
        Self { connected, tx }
    }
}

#[async_trait]
impl Connectivity for FixedConnectivity {
    async fn is_connected(&self) -> bool {
        self.connected
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

/// Weather service wired with the given doubles and default configuration.
pub fn service(api: Arc<MockApi>, store: Arc<MemoryStore>, online: bool) -> WeatherService {
    WeatherService::new(
        api,
        store,
        Arc::new(FixedConnectivity::new(online)),
        &Config::default(),
    )
}

/// A small canonical snapshot recognizable in assertions.
pub fn sample_snapshot(code: &str, city: &str) -> WeatherSnapshot {
    WeatherSnapshot {
        location: Location {
            code: code.to_string(),
            city: Some(city.to_string()),
            ..Default::default()
        },
        forecasts: vec![ForecastEntry {
            datetime: "2024-06-01T06:00:00Z".to_string(),
            temperature: Some(29.0),
            humidity: Some(75.0),
            weather: Some("Cerah".to_string()),
            wind_speed: Some(3.5),
            wind_direction: Some("NE".to_string()),
            extra: serde_json::Map::new(),
        }],
        marine: None,
    }
}

/// Write a cache record for `key_suffix` with the given age.
pub async fn seed_cache<T: serde::Serialize>(store: &MemoryStore, key_suffix: &str, data: &T, age_ms: i64) {
    let record = json!({
        "data": data,
        "timestamp": Utc::now().timestamp_millis() - age_ms,
    });
    store
        .set(&format!("weather_cache_{}", key_suffix), &record.to_string())
        .await
        .unwrap();
}

pub const THREE_HOURS_MS: i64 = 3 * 60 * 60 * 1000;
