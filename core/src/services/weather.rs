//! Fetch orchestration: connectivity check, cache, bounded retry, fallback
//!
//! Resolution order for a location:
//! 1. offline + any cache record (even stale) → cached
//! 2. online + fresh cache record → cached, no network call
//! 3. bounded network retry with linear backoff
//! 4. stale cache record as last-known-good
//! 5. deterministic synthetic snapshot, cached so repeated calls during an
//!    outage are stable
//!
//! Two concurrent fetches for the same code may both miss the cache and both
//! hit the network; the later cache write wins. Accepted — the payloads are
//! equivalent and the window is one request long.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::external::{Connectivity, KeyValueStore, WeatherApi};
use crate::models::{MarineConditions, WeatherSnapshot};
use crate::services::cache::ForecastCache;
use crate::services::normalize;
use crate::services::rate_limit::RateLimiter;
use crate::services::synthetic::SyntheticGenerator;

const RETRY_BACKOFF_MS: u64 = 500;

/// Resolves weather snapshots with maximum availability under API failure.
pub struct WeatherService {
    api: Arc<dyn WeatherApi>,
    cache: ForecastCache,
    connectivity: Arc<dyn Connectivity>,
    rate_limiter: RateLimiter,
    synthetic: SyntheticGenerator,
    max_retry_attempts: u32,
}

impl WeatherService {
    pub fn new(
        api: Arc<dyn WeatherApi>,
        store: Arc<dyn KeyValueStore>,
        connectivity: Arc<dyn Connectivity>,
        config: &Config,
    ) -> Self {
        Self {
            api,
            cache: ForecastCache::new(store, &config.cache),
            connectivity,
            rate_limiter: RateLimiter::new(&config.rate_limit),
            synthetic: SyntheticGenerator::new(),
            max_retry_attempts: config.weather.max_retry_attempts,
        }
    }

    /// Resolve a snapshot for `location_code`. Only a programmer error (empty
    /// code) surfaces as `Err`; every data-layer failure is recovered through
    /// the cache or the synthetic generator.
    pub async fn get_weather_by_location(
        &self,
        location_code: &str,
    ) -> CoreResult<WeatherSnapshot> {
        if location_code.trim().is_empty() {
            return Err(CoreError::Validation(
                "location code must not be empty".to_string(),
            ));
        }

        let cache_key = self.cache.key_for(location_code);
        let (connected, cached) = tokio::join!(
            self.connectivity.is_connected(),
            self.cache.get::<WeatherSnapshot>(&cache_key)
        );

        if !connected {
            if let Some(record) = &cached {
                tracing::debug!(location_code, "offline, serving cached snapshot");
                return Ok(record.data.clone());
            }
            // offline with no cache: fall through, the network attempt will
            // fail fast and the synthetic path takes over
        } else if let Some(record) = &cached {
            if !self.cache.is_expired(record.timestamp) {
                return Ok(record.data.clone());
            }
        }

        match self.fetch_forecast_with_retry(location_code).await {
            Ok(raw) => {
                let snapshot = normalize::normalize_snapshot(location_code, &raw);
                self.cache.put(&cache_key, &snapshot).await;
                return Ok(snapshot);
            }
            Err(e) => {
                tracing::warn!(location_code, error = %e, "forecast fetch exhausted retries");
            }
        }

        if let Some(record) = cached {
            tracing::info!(location_code, "serving stale cache as last-known-good");
            return Ok(record.data);
        }

        tracing::info!(location_code, "no cache available, generating synthetic snapshot");
        let snapshot = self.synthetic.generate(location_code);
        self.cache.put(&cache_key, &snapshot).await;
        Ok(snapshot)
    }

    /// One initial try plus up to `max_retry_attempts` retries with linear
    /// backoff. Non-2xx responses and transport errors (including the request
    /// timeout) are equally retriable.
    async fn fetch_forecast_with_retry(&self, location_code: &str) -> CoreResult<Value> {
        let mut attempt: u32 = 0;
        loop {
            self.rate_limiter.admit();
            match self.api.fetch_forecast(location_code).await {
                Ok(raw) => return Ok(raw),
                Err(e) => {
                    attempt += 1;
                    if attempt > self.max_retry_attempts {
                        return Err(e);
                    }
                    tracing::debug!(
                        location_code,
                        attempt,
                        error = %e,
                        "forecast fetch failed, backing off"
                    );
                    tokio::time::sleep(Duration::from_millis(RETRY_BACKOFF_MS * attempt as u64))
                        .await;
                }
            }
        }
    }

    /// Marine conditions for a coordinate: single attempt, cache-backed.
    /// Falls back to the stale cache record; with no record the error
    /// propagates and the caller decides (the alert evaluator skips).
    pub async fn get_marine_conditions(
        &self,
        lat: f64,
        lon: f64,
    ) -> CoreResult<MarineConditions> {
        let cache_key = self.cache.key_for(&format!("marine_{}_{}", lat, lon));
        let cached = self.cache.get::<MarineConditions>(&cache_key).await;

        self.rate_limiter.admit();
        match self.api.fetch_marine(lat, lon).await {
            Ok(raw) => {
                let marine = normalize::normalize_marine(&raw);
                self.cache.put(&cache_key, &marine).await;
                Ok(marine)
            }
            Err(e) => match cached {
                Some(record) => {
                    tracing::warn!(lat, lon, error = %e, "marine fetch failed, serving cached conditions");
                    Ok(record.data)
                }
                None => Err(e),
            },
        }
    }
}
