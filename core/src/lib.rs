//! Weather-data acquisition and resilience layer for coastal forecast apps
//!
//! Fetches forecast and marine data from the public BMKG API, caches it,
//! falls back to stale cache or deterministic synthetic data when the API is
//! unreachable, rate-limits outbound requests, and evaluates threshold-based
//! marine safety alerts.
//!
//! External concerns (key-value storage, connectivity, notification delivery,
//! alert history) are trait seams in [`external`]; the host application wires
//! its own implementations at the composition root.

pub mod config;
pub mod error;
pub mod external;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{CoreError, CoreResult};
