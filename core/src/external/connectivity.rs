//! Connectivity signal consumed by the fetch orchestrator

use async_trait::async_trait;
use tokio::sync::watch;

/// Reports whether the device/host currently has network access, and lets
/// consumers subscribe to changes.
#[async_trait]
pub trait Connectivity: Send + Sync {
    async fn is_connected(&self) -> bool;

    /// Receiver that yields the current state and subsequent transitions.
    fn subscribe(&self) -> watch::Receiver<bool>;
}

/// Trivial implementation for hosts without a connectivity source.
pub struct AlwaysOnline {
    tx: watch::Sender<bool>,
}

impl AlwaysOnline {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(true);
        Self { tx }
    }
}

impl Default for AlwaysOnline {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connectivity for AlwaysOnline {
    async fn is_connected(&self) -> bool {
        true
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}
