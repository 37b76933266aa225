//! Momentum indicators: RSI and MACD.

use signals_core::{MacdMomentum, RsiCondition};

use crate::moving_average::ema;

/// Relative Strength Index over simple average gains/losses.
///
/// Uses the most recent `period + 1` closes: `period` deltas, averaged
/// without smoothing.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    oversold: f64,
    overbought: f64,
}

impl Rsi {
    /// Create an RSI with custom thresholds.
    pub fn new(period: usize, oversold: f64, overbought: f64) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        assert!(
            oversold < overbought,
            "Oversold threshold must be below overbought"
        );
        Self {
            period,
            oversold,
            overbought,
        }
    }

    /// Minimum window length for a non-neutral classification.
    pub fn min_window(&self) -> usize {
        self.period + 1
    }

    /// RSI value in 0–100, or `None` when the window is too short.
    pub fn value(&self, closes: &[f64]) -> Option<f64> {
        if closes.len() < self.min_window() {
            return None;
        }

        let window = &closes[closes.len() - self.min_window()..];
        let mut gains = 0.0;
        let mut losses = 0.0;
        for pair in window.windows(2) {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                gains += change;
            } else {
                losses -= change;
            }
        }

        let avg_gain = gains / self.period as f64;
        let avg_loss = losses / self.period as f64;

        if avg_loss == 0.0 {
            // No losing candles: saturated unless the window never moved
            if avg_gain == 0.0 {
                return Some(50.0);
            }
            return Some(100.0);
        }

        let rs = avg_gain / avg_loss;
        Some(100.0 - 100.0 / (1.0 + rs))
    }

    /// Classify the window against the oversold/overbought thresholds.
    pub fn classify(&self, closes: &[f64]) -> RsiCondition {
        match self.value(closes) {
            Some(rsi) if rsi < self.oversold => RsiCondition::Oversold,
            Some(rsi) if rsi > self.overbought => RsiCondition::Overbought,
            _ => RsiCondition::Neutral,
        }
    }
}

impl Default for Rsi {
    /// RSI(14) with the standard 30/70 thresholds.
    fn default() -> Self {
        Self::new(14, 30.0, 70.0)
    }
}

/// MACD line: EMA(fast) − EMA(slow) over the full window.
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
}

impl Macd {
    /// Create a MACD with custom periods.
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        assert!(fast_period > 0 && slow_period > 0);
        assert!(
            fast_period < slow_period,
            "Fast period must be less than slow period"
        );
        Self {
            fast_period,
            slow_period,
        }
    }

    /// Minimum window length for a non-neutral classification.
    pub fn min_window(&self) -> usize {
        self.slow_period
    }

    /// MACD line value, or `None` when the window is too short.
    pub fn value(&self, closes: &[f64]) -> Option<f64> {
        let fast = ema(closes, self.fast_period)?;
        let slow = ema(closes, self.slow_period)?;
        Some(fast - slow)
    }

    /// Classify the sign of the MACD line.
    pub fn classify(&self, closes: &[f64]) -> MacdMomentum {
        match self.value(closes) {
            Some(line) if line > 0.0 => MacdMomentum::Bullish,
            Some(line) if line < 0.0 => MacdMomentum::Bearish,
            _ => MacdMomentum::Neutral,
        }
    }
}

impl Default for Macd {
    /// Standard 12/26 MACD line.
    fn default() -> Self {
        Self::new(12, 26)
    }
}
