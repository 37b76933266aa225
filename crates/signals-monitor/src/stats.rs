//! Aggregate statistics over tracked signals.

use serde::Serialize;
use signals_core::{Signal, SignalStatus};

/// Rolled-up performance counters for a set of signals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalStats {
    pub total: usize,
    pub active: usize,
    pub wins: usize,
    pub losses: usize,
    pub expired: usize,
    pub invalidated: usize,
    /// Wins over decided signals (wins + losses), as a percent.
    pub win_rate: f64,
    /// Mean profit/loss percent across all closed signals with an outcome.
    pub avg_profit_loss: f64,
}

impl SignalStats {
    pub fn compute(signals: &[Signal]) -> Self {
        let mut stats = Self {
            total: signals.len(),
            active: 0,
            wins: 0,
            losses: 0,
            expired: 0,
            invalidated: 0,
            win_rate: 0.0,
            avg_profit_loss: 0.0,
        };

        let mut pl_sum = 0.0;
        let mut pl_count = 0usize;

        for signal in signals {
            match signal.status {
                SignalStatus::Active => stats.active += 1,
                SignalStatus::HitTp1 | SignalStatus::HitTp2 => stats.wins += 1,
                SignalStatus::HitSl => stats.losses += 1,
                SignalStatus::Expired => stats.expired += 1,
                SignalStatus::MarketInvalid | SignalStatus::TechnicalInvalid => {
                    stats.invalidated += 1
                }
            }
            if let Some(outcome) = &signal.outcome {
                pl_sum += outcome.profit_loss;
                pl_count += 1;
            }
        }

        let decided = stats.wins + stats.losses;
        if decided > 0 {
            stats.win_rate = stats.wins as f64 / decided as f64 * 100.0;
        }
        if pl_count > 0 {
            stats.avg_profit_loss = pl_sum / pl_count as f64;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use signals_core::{
        IndicatorSnapshot, MarketType, Outcome, Recommendation, Timeframe, TradingPair, TrendState,
    };
    use uuid::Uuid;

    fn signal_with(status: SignalStatus, profit_loss: Option<f64>) -> Signal {
        let now = Utc::now();
        Signal {
            id: Uuid::new_v4(),
            pair: TradingPair::new("BTC", "USDT"),
            market: MarketType::Crypto,
            timeframe: Timeframe::Minute15,
            recommendation: Recommendation::Buy,
            entry_price: 100.0,
            stop_loss: 98.5,
            take_profit_1: 102.0,
            take_profit_2: 105.0,
            risk_reward_ratio: 2.0,
            confidence: 80,
            indicators: IndicatorSnapshot::default(),
            rationale: String::new(),
            created_at: now,
            expires_at: now + Duration::hours(24),
            status,
            market_trend: TrendState::unknown(now),
            outcome: profit_loss.map(|pl| Outcome {
                final_price: 100.0 * (1.0 + pl / 100.0),
                profit_loss: pl,
                outcome_type: status,
                closed_at: now,
                reason: String::new(),
            }),
            price_history: Vec::new(),
            last_price_check: now,
        }
    }

    #[test]
    fn test_empty_set() {
        let stats = SignalStats::compute(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.avg_profit_loss, 0.0);
    }

    #[test]
    fn test_counters_and_win_rate() {
        let signals = vec![
            signal_with(SignalStatus::Active, None),
            signal_with(SignalStatus::HitTp1, Some(2.0)),
            signal_with(SignalStatus::HitTp2, Some(5.0)),
            signal_with(SignalStatus::HitSl, Some(-1.5)),
            signal_with(SignalStatus::Expired, Some(0.5)),
            signal_with(SignalStatus::MarketInvalid, Some(-0.5)),
        ];
        let stats = SignalStats::compute(&signals);
        assert_eq!(stats.total, 6);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.invalidated, 1);
        // 2 wins out of 3 decided
        assert!((stats.win_rate - 66.666_666).abs() < 0.001);
        // (2.0 + 5.0 - 1.5 + 0.5 - 0.5) / 5
        assert!((stats.avg_profit_loss - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_active_only_has_no_rate() {
        let signals = vec![
            signal_with(SignalStatus::Active, None),
            signal_with(SignalStatus::Active, None),
        ];
        let stats = SignalStats::compute(&signals);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.win_rate, 0.0);
    }
}
