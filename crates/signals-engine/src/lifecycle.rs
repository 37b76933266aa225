//! The signal lifecycle state machine.

use chrono::{DateTime, Utc};

use signals_core::{
    Outcome, PricePoint, Recommendation, Signal, SignalEvent, SignalStatus, Trend, TrendState,
};

/// One consistent market observation for a pair+timeframe.
///
/// Every signal in the same pair+timeframe group is evaluated against the
/// same tick within a cycle.
#[derive(Debug, Clone, Copy)]
pub struct MarketTick {
    pub price: f64,
    pub trend: TrendState,
    pub observed_at: DateTime<Utc>,
}

const REASON_STOP_LOSS: &str = "Stop loss hit";
const REASON_TAKE_PROFIT_1: &str = "Take profit 1 hit";
const REASON_TAKE_PROFIT_2: &str = "Take profit 2 hit";
const REASON_EXPIRED: &str = "Signal expired due to time limit";
const REASON_MARKET: &str = "Market trend changed, signal no longer valid";

/// Re-evaluates open signals and performs terminal transitions.
///
/// Takes the signal by value and returns the updated document plus the
/// events to publish; persistence is the caller's concern. Terminal
/// signals pass through untouched, so replaying any tick against a
/// closed signal is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalLifecycleManager;

impl SignalLifecycleManager {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate one signal against a tick.
    ///
    /// Transition priority: market invalidation, then expiry, then price
    /// targets with the stop loss checked before either take profit. When
    /// nothing matches, only the price sample, last check time, and trend
    /// copy are updated.
    pub fn evaluate(&self, mut signal: Signal, tick: &MarketTick) -> (Signal, Vec<SignalEvent>) {
        if signal.status.is_terminal() {
            return (signal, Vec::new());
        }

        let old_status = signal.status;
        signal.record_price(PricePoint::new(tick.price, tick.observed_at));
        signal.last_price_check = tick.observed_at;

        let transition = self
            .check_market_invalidation(&signal, tick)
            .or_else(|| self.check_expiry(&signal, tick))
            .or_else(|| self.check_price_targets(&signal, tick));

        match transition {
            Some((status, profit_loss, reason)) => {
                signal.status = status;
                signal.outcome = Some(Outcome {
                    final_price: tick.price,
                    profit_loss,
                    outcome_type: status,
                    closed_at: tick.observed_at,
                    reason: reason.to_string(),
                });
                let event = SignalEvent::StatusChanged {
                    signal_id: signal.id,
                    old_status,
                    new_status: status,
                    outcome: signal.outcome.clone(),
                };
                (signal, vec![event])
            }
            None => {
                signal.market_trend = tick.trend;
                (signal, Vec::new())
            }
        }
    }

    /// A recorded non-unknown trend that differs from the fresh verdict
    /// invalidates the signal regardless of price position.
    fn check_market_invalidation(
        &self,
        signal: &Signal,
        tick: &MarketTick,
    ) -> Option<(SignalStatus, f64, &'static str)> {
        if signal.market_trend.current_trend != Trend::Unknown
            && signal.market_trend.current_trend != tick.trend.current_trend
        {
            return Some((SignalStatus::MarketInvalid, 0.0, REASON_MARKET));
        }
        None
    }

    fn check_expiry(
        &self,
        signal: &Signal,
        tick: &MarketTick,
    ) -> Option<(SignalStatus, f64, &'static str)> {
        if signal.is_expired(tick.observed_at) {
            return Some((SignalStatus::Expired, 0.0, REASON_EXPIRED));
        }
        None
    }

    /// Direction-dependent level checks. The stop loss is checked first:
    /// when a gap crosses both levels in one tick the conservative
    /// outcome wins.
    fn check_price_targets(
        &self,
        signal: &Signal,
        tick: &MarketTick,
    ) -> Option<(SignalStatus, f64, &'static str)> {
        let price = tick.price;
        let status = match signal.recommendation {
            Recommendation::Buy => {
                if price <= signal.stop_loss {
                    SignalStatus::HitSl
                } else if price >= signal.take_profit_2 {
                    SignalStatus::HitTp2
                } else if price >= signal.take_profit_1 {
                    SignalStatus::HitTp1
                } else {
                    return None;
                }
            }
            Recommendation::Sell => {
                if price >= signal.stop_loss {
                    SignalStatus::HitSl
                } else if price <= signal.take_profit_2 {
                    SignalStatus::HitTp2
                } else if price <= signal.take_profit_1 {
                    SignalStatus::HitTp1
                } else {
                    return None;
                }
            }
        };

        let reason = match status {
            SignalStatus::HitSl => REASON_STOP_LOSS,
            SignalStatus::HitTp1 => REASON_TAKE_PROFIT_1,
            _ => REASON_TAKE_PROFIT_2,
        };
        Some((status, signal.profit_loss_pct(price), reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use signals_core::{IndicatorSnapshot, MarketType, Timeframe};
    use uuid::Uuid;

    fn buy_signal(now: DateTime<Utc>) -> Signal {
        Signal {
            id: Uuid::new_v4(),
            pair: "BTC/USDT".parse().unwrap(),
            market: MarketType::Crypto,
            timeframe: Timeframe::Minute15,
            recommendation: Recommendation::Buy,
            entry_price: 110_000.0,
            stop_loss: 108_400.0,
            take_profit_1: 112_200.0,
            take_profit_2: 115_500.0,
            risk_reward_ratio: 2200.0 / 1600.0,
            confidence: 85,
            indicators: IndicatorSnapshot::default(),
            rationale: String::new(),
            created_at: now,
            expires_at: now + Duration::hours(24),
            status: SignalStatus::Active,
            market_trend: TrendState::new(Trend::Bullish, 100.0, now),
            outcome: None,
            price_history: Vec::new(),
            last_price_check: now,
        }
    }

    fn sell_signal(now: DateTime<Utc>) -> Signal {
        Signal {
            recommendation: Recommendation::Sell,
            stop_loss: 111_650.0,
            take_profit_1: 107_800.0,
            take_profit_2: 104_500.0,
            market_trend: TrendState::new(Trend::Bearish, 100.0, now),
            ..buy_signal(now)
        }
    }

    fn tick(price: f64, trend: Trend, at: DateTime<Utc>) -> MarketTick {
        MarketTick {
            price,
            trend: TrendState::new(trend, 100.0, at),
            observed_at: at,
        }
    }

    #[test]
    fn test_buy_stop_loss_hit() {
        let now = Utc::now();
        let manager = SignalLifecycleManager::new();
        let (signal, events) =
            manager.evaluate(buy_signal(now), &tick(108_000.0, Trend::Bullish, now));

        assert_eq!(signal.status, SignalStatus::HitSl);
        let outcome = signal.outcome.unwrap();
        assert_eq!(outcome.final_price, 108_000.0);
        // (108000 - 110000) / 110000 * 100 ≈ -1.87%
        assert!((outcome.profit_loss - (-2000.0 / 110_000.0 * 100.0)).abs() < 1e-10);
        assert!(outcome.profit_loss < 0.0);
        assert_eq!(outcome.reason, "Stop loss hit");
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            SignalEvent::StatusChanged {
                old_status: SignalStatus::Active,
                new_status: SignalStatus::HitSl,
                ..
            }
        ));
    }

    #[test]
    fn test_buy_take_profit_ladder() {
        let now = Utc::now();
        let manager = SignalLifecycleManager::new();

        let (signal, _) = manager.evaluate(buy_signal(now), &tick(112_500.0, Trend::Bullish, now));
        assert_eq!(signal.status, SignalStatus::HitTp1);
        assert!(signal.outcome.unwrap().profit_loss > 0.0);

        let (signal, _) = manager.evaluate(buy_signal(now), &tick(116_000.0, Trend::Bullish, now));
        assert_eq!(signal.status, SignalStatus::HitTp2);
    }

    #[test]
    fn test_sell_targets_mirrored() {
        let now = Utc::now();
        let manager = SignalLifecycleManager::new();

        let (signal, _) = manager.evaluate(sell_signal(now), &tick(112_000.0, Trend::Bearish, now));
        assert_eq!(signal.status, SignalStatus::HitSl);
        assert!(signal.outcome.unwrap().profit_loss < 0.0);

        let (signal, _) = manager.evaluate(sell_signal(now), &tick(107_000.0, Trend::Bearish, now));
        assert_eq!(signal.status, SignalStatus::HitTp1);

        let (signal, _) = manager.evaluate(sell_signal(now), &tick(104_000.0, Trend::Bearish, now));
        assert_eq!(signal.status, SignalStatus::HitTp2);
    }

    #[test]
    fn test_stop_loss_wins_over_take_profit() {
        // Degenerate levels where one price satisfies both conditions:
        // the conservative stop loss must win.
        let now = Utc::now();
        let mut signal = buy_signal(now);
        signal.stop_loss = 112_000.0;
        signal.take_profit_1 = 111_000.0;
        signal.take_profit_2 = 111_500.0;

        let manager = SignalLifecycleManager::new();
        let (signal, _) = manager.evaluate(signal, &tick(111_800.0, Trend::Bullish, now));
        assert_eq!(signal.status, SignalStatus::HitSl);
    }

    #[test]
    fn test_market_invalidation_precedes_price_targets() {
        let now = Utc::now();
        let manager = SignalLifecycleManager::new();
        // Price is past tp2, but the trend flipped: invalidation wins
        let (signal, events) =
            manager.evaluate(buy_signal(now), &tick(116_000.0, Trend::Bearish, now));

        assert_eq!(signal.status, SignalStatus::MarketInvalid);
        let outcome = signal.outcome.unwrap();
        assert_eq!(outcome.profit_loss, 0.0);
        assert_eq!(outcome.reason, "Market trend changed, signal no longer valid");
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_unknown_recorded_trend_never_invalidates() {
        let now = Utc::now();
        let mut signal = buy_signal(now);
        signal.market_trend = TrendState::unknown(now);

        let manager = SignalLifecycleManager::new();
        let (signal, _) = manager.evaluate(signal, &tick(110_500.0, Trend::Bearish, now));
        assert_eq!(signal.status, SignalStatus::Active);
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let later = now + Duration::hours(25);
        let manager = SignalLifecycleManager::new();
        let (signal, _) = manager.evaluate(buy_signal(now), &tick(110_100.0, Trend::Bullish, later));

        assert_eq!(signal.status, SignalStatus::Expired);
        let outcome = signal.outcome.unwrap();
        assert_eq!(outcome.profit_loss, 0.0);
        assert_eq!(outcome.reason, "Signal expired due to time limit");
    }

    #[test]
    fn test_no_trigger_updates_tracking_fields_only() {
        let now = Utc::now();
        let later = now + Duration::minutes(5);
        let manager = SignalLifecycleManager::new();
        let (signal, events) =
            manager.evaluate(buy_signal(now), &tick(110_500.0, Trend::Bullish, later));

        assert_eq!(signal.status, SignalStatus::Active);
        assert!(signal.outcome.is_none());
        assert!(events.is_empty());
        assert_eq!(signal.price_history.len(), 1);
        assert_eq!(signal.price_history[0].price, 110_500.0);
        assert_eq!(signal.last_price_check, later);
        assert_eq!(signal.market_trend.last_updated, later);
    }

    #[test]
    fn test_terminal_signal_is_untouched() {
        let now = Utc::now();
        let manager = SignalLifecycleManager::new();
        let (closed, _) = manager.evaluate(buy_signal(now), &tick(108_000.0, Trend::Bullish, now));
        assert_eq!(closed.status, SignalStatus::HitSl);
        let frozen = closed.clone();

        // Replay wildly different ticks: nothing may change
        for price in [50_000.0, 120_000.0, 108_000.0] {
            let (replayed, events) =
                manager.evaluate(closed.clone(), &tick(price, Trend::Bearish, now));
            assert_eq!(replayed, frozen);
            assert!(events.is_empty());
        }
    }

    #[test]
    fn test_outcome_written_once() {
        let now = Utc::now();
        let manager = SignalLifecycleManager::new();
        let (closed, _) = manager.evaluate(buy_signal(now), &tick(116_000.0, Trend::Bullish, now));
        let first_outcome = closed.outcome.clone().unwrap();

        let (replayed, _) = manager.evaluate(closed, &tick(100_000.0, Trend::Bullish, now));
        assert_eq!(replayed.outcome.unwrap(), first_outcome);
    }
}
