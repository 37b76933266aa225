//! Event publishing trait and event types.

use serde::Serialize;
use uuid::Uuid;

use crate::types::{Outcome, Signal, SignalStatus, Timeframe, TradingPair, TrendState};

/// Logical events emitted by the engine, in mutation order, at-least-once.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum SignalEvent {
    /// A new signal was created and persisted
    #[serde(rename = "signal.created")]
    Created { signal: Box<Signal> },

    /// An active signal transitioned to a terminal status
    #[serde(rename = "signal.status_changed")]
    StatusChanged {
        signal_id: Uuid,
        old_status: SignalStatus,
        new_status: SignalStatus,
        outcome: Option<Outcome>,
    },

    /// The trend for a pair+timeframe was recomputed
    #[serde(rename = "trend.updated")]
    TrendUpdated {
        pair: TradingPair,
        timeframe: Timeframe,
        trend: TrendState,
    },
}

/// Downstream delivery seam.
///
/// The engine only guarantees each event is handed over at least once, in
/// the order the causing mutation occurred; transport is the
/// implementation's concern.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: SignalEvent);
}
