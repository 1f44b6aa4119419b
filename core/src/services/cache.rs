//! Best-effort forecast cache over an injected key-value store
//!
//! The cache is never authoritative: read failures deserialize to a miss and
//! write failures are logged and swallowed, so a broken storage layer can
//! never take the fetch path down with it. One record per location key; the
//! key space is unbounded, which is accepted for the expected fleet of saved
//! locations per user.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::CacheConfig;
use crate::external::KeyValueStore;
use crate::models::CacheRecord;

#[derive(Serialize)]
struct CacheEnvelope<'a, T> {
    data: &'a T,
    timestamp: i64,
}

/// Expiring key-value cache for weather snapshots and marine conditions.
pub struct ForecastCache {
    store: Arc<dyn KeyValueStore>,
    expiry: Duration,
    key_prefix: String,
}

impl ForecastCache {
    pub fn new(store: Arc<dyn KeyValueStore>, config: &CacheConfig) -> Self {
        Self {
            store,
            expiry: Duration::from_secs(config.expiry_secs),
            key_prefix: config.key_prefix.clone(),
        }
    }

    /// Full cache key for a location code or other suffix.
    pub fn key_for(&self, suffix: &str) -> String {
        format!("{}{}", self.key_prefix, suffix)
    }

    /// Read a record. Any storage or deserialization failure is a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<CacheRecord<T>> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "cache read failed");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(key, error = %e, "cache record unreadable, treating as miss");
                None
            }
        }
    }

    /// Write a record stamped with the current time, overwriting any prior
    /// record for the key. Persistence failure is logged, not propagated.
    pub async fn put<T: Serialize>(&self, key: &str, data: &T) {
        let envelope = CacheEnvelope {
            data,
            timestamp: Utc::now().timestamp_millis(),
        };

        let serialized = match serde_json::to_string(&envelope) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(key, error = %e, "cache record serialization failed");
                return;
            }
        };

        if let Err(e) = self.store.set(key, &serialized).await {
            tracing::warn!(key, error = %e, "cache write failed");
        }
    }

    /// Whether a record written at `timestamp_ms` has passed the expiry
    /// window. Expired records are still served as last-known-good under
    /// failure, so this is a freshness check rather than an eviction rule.
    pub fn is_expired(&self, timestamp_ms: i64) -> bool {
        let age_ms = Utc::now().timestamp_millis() - timestamp_ms;
        age_ms > self.expiry.as_millis() as i64
    }
}
