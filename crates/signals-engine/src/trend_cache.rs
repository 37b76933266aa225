//! Keyed trend state cache.

use std::collections::HashMap;
use std::sync::RwLock;

use signals_core::{Timeframe, TradingPair, TrendState};

/// Per pair+timeframe trend store, updated via replace-on-write.
///
/// Reads and writes are whole-value swaps under a short lock, so
/// concurrent workers never observe a partially updated state. Work is
/// keyed one item per pair+timeframe, so no two workers replace the same
/// entry in one cycle.
#[derive(Debug, Default)]
pub struct TrendCache {
    inner: RwLock<HashMap<(TradingPair, Timeframe), TrendState>>,
}

impl TrendCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest trend for a pair+timeframe, if one has been computed.
    pub fn get(&self, pair: &TradingPair, timeframe: Timeframe) -> Option<TrendState> {
        self.inner
            .read()
            .expect("trend cache lock poisoned")
            .get(&(pair.clone(), timeframe))
            .copied()
    }

    /// Replace the trend for a pair+timeframe, returning the previous one.
    pub fn replace(
        &self,
        pair: &TradingPair,
        timeframe: Timeframe,
        trend: TrendState,
    ) -> Option<TrendState> {
        self.inner
            .write()
            .expect("trend cache lock poisoned")
            .insert((pair.clone(), timeframe), trend)
    }

    /// Number of tracked pair+timeframe entries.
    pub fn len(&self) -> usize {
        self.inner.read().expect("trend cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
