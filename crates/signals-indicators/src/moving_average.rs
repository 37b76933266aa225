//! Exponential moving average and the EMA crossover classification.

use signals_core::EmaTrend;

/// Exponential moving average over the full window.
///
/// Multiplier is 2/(period+1); the recurrence is seeded with the first
/// price in the window and folded over the rest. Returns `None` when the
/// window is shorter than `period`.
pub fn ema(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period {
        return None;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let one_minus_mult = 1.0 - multiplier;

    let mut value = prices[0];
    for &price in &prices[1..] {
        value = price * multiplier + value * one_minus_mult;
    }
    Some(value)
}

/// EMA crossover classifier comparing a fast EMA against a slow one.
#[derive(Debug, Clone)]
pub struct EmaCross {
    fast_period: usize,
    slow_period: usize,
}

impl EmaCross {
    /// Create a crossover classifier. Fast must be shorter than slow.
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

    /// Classify the window: bullish when fast EMA > slow EMA, bearish
    /// when below, neutral on equality or insufficient data.
    pub fn classify(&self, closes: &[f64]) -> EmaTrend {
        let (Some(fast), Some(slow)) = (
            ema(closes, self.fast_period),
            ema(closes, self.slow_period),
        ) else {
            return EmaTrend::Neutral;
        };

        if fast > slow {
            EmaTrend::Bullish
        } else if fast < slow {
            EmaTrend::Bearish
        } else {
            EmaTrend::Neutral
        }
    }
}

impl Default for EmaCross {
    /// Standard EMA(20) vs EMA(50) crossover.
    fn default() -> Self {
        Self::new(20, 50)
    }
}
