//! Configuration management for the marine weather core
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CUACA_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Weather/marine API configuration
    pub weather: WeatherConfig,

    /// Forecast cache configuration
    pub cache: CacheConfig,

    /// Client-side rate limit configuration
    pub rate_limit: RateLimitConfig,

    /// Alert evaluation configuration
    pub alerts: AlertConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Public forecast API endpoint
    pub base_url: String,

    /// Maritime conditions API endpoint
    pub marine_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Additional tries beyond the first attempt
    pub max_retry_attempts: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Seconds after which a cache record counts as stale
    pub expiry_secs: u64,

    /// Prefix prepended to every cache key
    pub key_prefix: String,

    /// Directory for the file-backed store
    pub dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    /// Sliding window length in seconds
    pub window_secs: u64,

    /// Soft cap on requests per window
    pub max_requests: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertConfig {
    /// Seconds between evaluation passes
    pub interval_secs: u64,

    /// Locations evaluated on each pass
    #[serde(default)]
    pub locations: Vec<AlertLocation>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertLocation {
    /// Administrative-area code (adm4)
    pub code: String,

    /// Display name used in alert messages
    pub name: Option<String>,

    /// Coordinates for the marine API; without them the evaluator falls back
    /// to the forecast wind speed
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CUACA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default(
                "weather.base_url",
                "https://api.bmkg.go.id/publik/prakiraan-cuaca",
            )?
            .set_default(
                "weather.marine_url",
                "https://peta-maritim.bmkg.go.id/public_api/perairan",
            )?
            .set_default("weather.request_timeout_secs", 10)?
            .set_default("weather.max_retry_attempts", 2)?
            .set_default("cache.expiry_secs", 3 * 60 * 60)?
            .set_default("cache.key_prefix", "weather_cache_")?
            .set_default("cache.dir", ".cache")?
            .set_default("rate_limit.window_secs", 60)?
            .set_default("rate_limit.max_requests", 60)?
            .set_default("alerts.interval_secs", 30 * 60)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CUACA_ prefix)
            .add_source(
                Environment::with_prefix("CUACA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            weather: WeatherConfig::default(),
            cache: CacheConfig::default(),
            rate_limit: RateLimitConfig::default(),
            alerts: AlertConfig::default(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.bmkg.go.id/publik/prakiraan-cuaca".to_string(),
            marine_url: "https://peta-maritim.bmkg.go.id/public_api/perairan".to_string(),
            request_timeout_secs: 10,
            max_retry_attempts: 2,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            expiry_secs: 3 * 60 * 60,
            key_prefix: "weather_cache_".to_string(),
            dir: ".cache".to_string(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            max_requests: 60,
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30 * 60,
            locations: Vec::new(),
        }
    }
}
