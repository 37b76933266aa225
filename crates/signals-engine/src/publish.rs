//! Event publisher implementations.

use tokio::sync::broadcast;
use tracing::{debug, info};

use signals_core::{EventPublisher, SignalEvent};

/// Publisher that writes every event to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPublisher;

impl TracingPublisher {
    pub fn new() -> Self {
        Self
    }
}

impl EventPublisher for TracingPublisher {
    fn publish(&self, event: SignalEvent) {
        match &event {
            SignalEvent::Created { signal } => {
                info!(
                    signal_id = %signal.id,
                    pair = %signal.pair,
                    timeframe = %signal.timeframe,
                    recommendation = %signal.recommendation,
                    entry = signal.entry_price,
                    confidence = signal.confidence,
                    "signal created"
                );
            }
            SignalEvent::StatusChanged {
                signal_id,
                old_status,
                new_status,
                outcome,
            } => {
                info!(
                    %signal_id,
                    old_status = %old_status,
                    new_status = %new_status,
                    profit_loss = outcome.as_ref().map(|o| o.profit_loss),
                    "signal status changed"
                );
            }
            SignalEvent::TrendUpdated {
                pair,
                timeframe,
                trend,
            } => {
                debug!(
                    %pair,
                    timeframe = %timeframe,
                    trend = %trend.current_trend,
                    strength = trend.trend_strength,
                    "trend updated"
                );
            }
        }
    }
}

/// Publisher that fans events out over a tokio broadcast channel.
///
/// Downstream consumers (push transport, message queue bridge) subscribe
/// via [`BroadcastPublisher::subscribe`]. Sending with no subscribers is
/// not an error; a lagged subscriber misses events, which is acceptable
/// under the at-least-once contract only because the store holds the
/// authoritative state.
#[derive(Debug, Clone)]
pub struct BroadcastPublisher {
    tx: broadcast::Sender<SignalEvent>,
}

impl BroadcastPublisher {
    /// Create a publisher with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<SignalEvent> {
        self.tx.subscribe()
    }
}

impl EventPublisher for BroadcastPublisher {
    fn publish(&self, event: SignalEvent) {
        // Err means no live subscribers; nothing to deliver to.
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use signals_core::{SignalStatus, Timeframe, Trend, TrendState};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_broadcast_delivery_in_order() {
        let publisher = BroadcastPublisher::new(16);
        let mut rx = publisher.subscribe();

        let id = Uuid::new_v4();
        publisher.publish(SignalEvent::StatusChanged {
            signal_id: id,
            old_status: SignalStatus::Active,
            new_status: SignalStatus::HitTp1,
            outcome: None,
        });
        publisher.publish(SignalEvent::TrendUpdated {
            pair: "BTC/USDT".parse().unwrap(),
            timeframe: Timeframe::Minute15,
            trend: TrendState::new(Trend::Bullish, 100.0, Utc::now()),
        });

        assert!(matches!(
            rx.recv().await.unwrap(),
            SignalEvent::StatusChanged { signal_id, .. } if signal_id == id
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            SignalEvent::TrendUpdated { .. }
        ));
    }

    #[test]
    fn test_publish_without_subscribers_is_fine() {
        let publisher = BroadcastPublisher::new(4);
        publisher.publish(SignalEvent::StatusChanged {
            signal_id: Uuid::new_v4(),
            old_status: SignalStatus::Active,
            new_status: SignalStatus::Expired,
            outcome: None,
        });
    }
}
