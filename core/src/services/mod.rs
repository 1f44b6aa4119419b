//! Core services: fetch orchestration, caching, rate limiting, normalization,
//! synthetic fallback and alert evaluation

pub mod alert;
pub mod cache;
pub mod normalize;
pub mod rate_limit;
pub mod synthetic;
pub mod weather;

pub use alert::AlertEvaluator;
pub use cache::ForecastCache;
pub use rate_limit::RateLimiter;
pub use synthetic::SyntheticGenerator;
pub use weather::WeatherService;
