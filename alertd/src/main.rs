//! Marine weather alert daemon
//!
//! Periodically evaluates safety thresholds for the configured coastal
//! locations and emits alerts through the wired collaborators. This is the
//! composition root: every service is constructed and injected here.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cuacalaut_core::external::{
    AlwaysOnline, BmkgClient, FileStore, KeyValueStore, LogDispatcher, MemoryAlertStore,
};
use cuacalaut_core::services::{AlertEvaluator, WeatherService};
use cuacalaut_core::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cuacalaut_core=debug,cuacalaut_alertd=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting marine weather alert daemon");
    tracing::info!("Environment: {}", config.environment);

    if config.alerts.locations.is_empty() {
        tracing::warn!("no alert locations configured; the daemon will idle");
    }

    let api = Arc::new(BmkgClient::new(&config.weather)?);
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.cache.dir)?);
    let connectivity = Arc::new(AlwaysOnline::new());
    let weather = Arc::new(WeatherService::new(api, store, connectivity, &config));

    let mut evaluator = AlertEvaluator::new(
        weather,
        Arc::new(MemoryAlertStore::new()),
        Arc::new(LogDispatcher),
    );
    for location in &config.alerts.locations {
        if let (Some(lat), Some(lon)) = (location.lat, location.lon) {
            evaluator = evaluator.with_coords(location.code.clone(), lat, lon);
        }
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(config.alerts.interval_secs));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                for location in &config.alerts.locations {
                    let name = location.name.as_deref();
                    match evaluator.evaluate_and_emit(&location.code, name).await {
                        Some(alerts) => tracing::info!(
                            code = %location.code,
                            emitted = alerts.len(),
                            "alert evaluation complete"
                        ),
                        None => tracing::warn!(
                            code = %location.code,
                            "alert evaluation skipped"
                        ),
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}
