//! Market trend classification from an indicator snapshot.

use chrono::{DateTime, Utc};
use signals_core::{EmaTrend, IndicatorSnapshot, MacdMomentum, Trend, TrendState};

/// Aggregates indicator classifications into a trend verdict.
///
/// Only EMA and MACD contribute: RSI flags overbought/oversold conditions
/// for recommendations, not trend direction. Once an evaluation has run
/// the verdict is never `unknown`; a tie (including no firing indicators)
/// is `sideways` at strength 50.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendClassifier;

impl TrendClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a snapshot, stamping the verdict with `now`.
    pub fn classify(&self, snapshot: &IndicatorSnapshot, now: DateTime<Utc>) -> TrendState {
        let mut bullish = 0u32;
        let mut bearish = 0u32;

        match snapshot.ema {
            EmaTrend::Bullish => bullish += 1,
            EmaTrend::Bearish => bearish += 1,
            EmaTrend::Neutral => {}
        }
        match snapshot.macd {
            MacdMomentum::Bullish => bullish += 1,
            MacdMomentum::Bearish => bearish += 1,
            MacdMomentum::Neutral => {}
        }

        let (trend, strength) = if bullish > bearish {
            (Trend::Bullish, bullish as f64 / 2.0 * 100.0)
        } else if bearish > bullish {
            (Trend::Bearish, bearish as f64 / 2.0 * 100.0)
        } else {
            (Trend::Sideways, 50.0)
        };

        TrendState::new(trend, strength, now)
    }
}
