//! Persistent signal store trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{Signal, Timeframe, TradingPair};

/// Long-lived signal storage.
///
/// The engine reads active signals and writes full Signal documents.
/// Updates to a single signal are single-writer: only the lifecycle
/// manager mutates a given signal, one cycle at a time.
#[async_trait]
pub trait SignalStore: Send + Sync {
    /// Persist a newly created signal.
    async fn insert(&self, signal: Signal) -> Result<(), StoreError>;

    /// Replace the stored document for an existing signal.
    async fn update(&self, signal: Signal) -> Result<(), StoreError>;

    /// Fetch a signal by id.
    async fn get(&self, id: Uuid) -> Result<Option<Signal>, StoreError>;

    /// All signals currently in `active` status.
    async fn active_signals(&self) -> Result<Vec<Signal>, StoreError>;

    /// Whether an active signal already exists for a pair+timeframe.
    ///
    /// Used by generation to de-duplicate.
    async fn has_active(
        &self,
        pair: &TradingPair,
        timeframe: Timeframe,
    ) -> Result<bool, StoreError>;

    /// Every stored signal, any status.
    async fn all_signals(&self) -> Result<Vec<Signal>, StoreError>;
}
