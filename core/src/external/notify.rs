//! Notification dispatch and alert history seams
//!
//! The core emits alerts; delivery (push service, document store) belongs to
//! the host application. Both side effects are best-effort from the
//! evaluator's point of view.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::models::AlertRecord;

/// Delivery priority as understood by the push layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Normal,
    High,
}

/// A notification handed to the external dispatcher
#[derive(Debug, Clone, Serialize)]
pub struct NotificationMessage {
    pub title: String,
    pub body: String,
    pub category: String,
    pub priority: NotificationPriority,
    pub data: Value,
}

/// Outbound notification channel
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn send(&self, message: NotificationMessage) -> CoreResult<()>;
}

/// Dispatcher that only logs; useful for the daemon and local development.
pub struct LogDispatcher;

#[async_trait]
impl NotificationDispatcher for LogDispatcher {
    async fn send(&self, message: NotificationMessage) -> CoreResult<()> {
        tracing::info!(
            title = %message.title,
            category = %message.category,
            priority = ?message.priority,
            "notification: {}",
            message.body
        );
        Ok(())
    }
}

/// Append-only document sink for alert history/audit
#[async_trait]
pub trait AlertStore: Send + Sync {
    async fn append(&self, collection: &str, alert: &AlertRecord) -> CoreResult<()>;
}

/// In-memory alert store, used in tests and by the daemon when no external
/// document store is wired.
#[derive(Default)]
pub struct MemoryAlertStore {
    entries: Mutex<Vec<AlertRecord>>,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<AlertRecord> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl AlertStore for MemoryAlertStore {
    async fn append(&self, _collection: &str, alert: &AlertRecord) -> CoreResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::Storage("alert store lock poisoned".to_string()))?;
        entries.push(alert.clone());
        Ok(())
    }
}
