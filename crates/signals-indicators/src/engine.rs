//! Combined indicator engine producing a full snapshot per window.

use signals_core::{IndicatorSnapshot, PriceSeries};

use crate::momentum::{Macd, Rsi};
use crate::moving_average::EmaCross;

/// Classifies one price window with all three indicators.
///
/// Deterministic: identical windows always yield identical snapshots.
/// Indicators whose minimum window is not met classify as neutral; the
/// snapshot as a whole never fails.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    ema_cross: EmaCross,
    rsi: Rsi,
    macd: Macd,
}

impl IndicatorEngine {
    /// Engine with standard parameters: EMA 20/50, RSI 14 (30/70), MACD 12/26.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with custom indicator parameterization.
    pub fn with_indicators(ema_cross: EmaCross, rsi: Rsi, macd: Macd) -> Self {
        Self {
            ema_cross,
            rsi,
            macd,
        }
    }

    /// Classify a window of closing prices, oldest-first.
    pub fn snapshot(&self, closes: &[f64]) -> IndicatorSnapshot {
        IndicatorSnapshot {
            ema: self.ema_cross.classify(closes),
            rsi: self.rsi.classify(closes),
            macd: self.macd.classify(closes),
        }
    }

    /// Classify a price series.
    pub fn snapshot_series(&self, series: &PriceSeries) -> IndicatorSnapshot {
        self.snapshot(&series.closes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signals_core::{EmaTrend, MacdMomentum, RsiCondition};

    #[test]
    fn test_snapshot_uptrend() {
        let engine = IndicatorEngine::new();
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let snapshot = engine.snapshot(&closes);

        assert_eq!(snapshot.ema, EmaTrend::Bullish);
        assert_eq!(snapshot.rsi, RsiCondition::Overbought);
        assert_eq!(snapshot.macd, MacdMomentum::Bullish);
    }

    #[test]
    fn test_snapshot_short_window_all_neutral() {
        let engine = IndicatorEngine::new();
        let closes = vec![100.0, 101.0, 102.0];
        let snapshot = engine.snapshot(&closes);

        assert_eq!(snapshot, IndicatorSnapshot::default());
    }

    #[test]
    fn test_snapshot_series_matches_closes() {
        use chrono::{DateTime, Duration};
        use signals_core::{PricePoint, Timeframe};

        let engine = IndicatorEngine::new();
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();

        let mut series = PriceSeries::new("BTC/USDT".parse().unwrap(), Timeframe::Minute15);
        let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        for (i, close) in closes.iter().enumerate() {
            series.push(PricePoint::new(
                *close,
                start + Duration::minutes(15 * i as i64),
            ));
        }

        assert_eq!(engine.snapshot_series(&series), engine.snapshot(&closes));
    }

    #[test]
    fn test_snapshot_deterministic() {
        let engine = IndicatorEngine::new();
        let closes: Vec<f64> = (0..80)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 3.0)
            .collect();

        let first = engine.snapshot(&closes);
        for _ in 0..10 {
            assert_eq!(engine.snapshot(&closes), first);
        }
    }
}
