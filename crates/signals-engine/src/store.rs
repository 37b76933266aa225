//! In-memory signal store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use signals_core::{Signal, SignalStatus, SignalStore, StoreError, Timeframe, TradingPair};

/// Map-backed [`SignalStore`] for running without external storage.
///
/// Holds full Signal documents keyed by id; queries scan, which is fine
/// for the bounded pair universe this engine tracks.
#[derive(Debug, Default)]
pub struct MemorySignalStore {
    signals: RwLock<HashMap<Uuid, Signal>>,
}

impl MemorySignalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SignalStore for MemorySignalStore {
    async fn insert(&self, signal: Signal) -> Result<(), StoreError> {
        self.signals.write().await.insert(signal.id, signal);
        Ok(())
    }

    async fn update(&self, signal: Signal) -> Result<(), StoreError> {
        let mut signals = self.signals.write().await;
        if !signals.contains_key(&signal.id) {
            return Err(StoreError::NotFound(signal.id));
        }
        signals.insert(signal.id, signal);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Signal>, StoreError> {
        Ok(self.signals.read().await.get(&id).cloned())
    }

    async fn active_signals(&self) -> Result<Vec<Signal>, StoreError> {
        let mut active: Vec<Signal> = self
            .signals
            .read()
            .await
            .values()
            .filter(|s| s.status == SignalStatus::Active)
            .cloned()
            .collect();
        active.sort_by_key(|s| s.created_at);
        Ok(active)
    }

    async fn has_active(
        &self,
        pair: &TradingPair,
        timeframe: Timeframe,
    ) -> Result<bool, StoreError> {
        Ok(self.signals.read().await.values().any(|s| {
            s.status == SignalStatus::Active && s.pair == *pair && s.timeframe == timeframe
        }))
    }

    async fn all_signals(&self) -> Result<Vec<Signal>, StoreError> {
        let mut all: Vec<Signal> = self.signals.read().await.values().cloned().collect();
        all.sort_by_key(|s| s.created_at);
        Ok(all)
    }
}
