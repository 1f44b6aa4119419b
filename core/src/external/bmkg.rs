//! BMKG API client for fetching forecast and marine data
//!
//! Payloads are returned as loosely-typed JSON and mapped into the canonical
//! schema by the normalizer; the client itself only handles transport.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::WeatherConfig;
use crate::error::{CoreError, CoreResult};

/// Transport seam for the upstream weather service.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// `GET <base>?adm4=<code>` — forecast for an administrative area
    async fn fetch_forecast(&self, location_code: &str) -> CoreResult<Value>;

    /// `GET <marine>?lat=<lat>&lon=<lon>` — maritime conditions for a point
    async fn fetch_marine(&self, lat: f64, lon: f64) -> CoreResult<Value>;
}

/// Production client for the public BMKG endpoints
#[derive(Clone)]
pub struct BmkgClient {
    client: Client,
    base_url: String,
    marine_url: String,
}

impl BmkgClient {
    /// Create a client with the configured endpoints and request timeout.
    pub fn new(config: &WeatherConfig) -> CoreResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            marine_url: config.marine_url.clone(),
        })
    }

    async fn get_json(&self, url: &str) -> CoreResult<Value> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CoreError::UpstreamStatus { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl WeatherApi for BmkgClient {
    async fn fetch_forecast(&self, location_code: &str) -> CoreResult<Value> {
        let url = format!("{}?adm4={}", self.base_url, location_code);
        self.get_json(&url).await
    }

    async fn fetch_marine(&self, lat: f64, lon: f64) -> CoreResult<Value> {
        let url = format!("{}?lat={}&lon={}", self.marine_url, lat, lon);
        self.get_json(&url).await
    }
}
