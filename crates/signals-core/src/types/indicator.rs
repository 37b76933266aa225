//! Indicator classification types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// EMA(20) vs EMA(50) crossover classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmaTrend {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

/// RSI(14) condition classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RsiCondition {
    Oversold,
    Overbought,
    #[default]
    Neutral,
}

/// MACD momentum classification (EMA12 − EMA26 sign).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MacdMomentum {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl EmaTrend {
    pub fn is_neutral(&self) -> bool {
        matches!(self, EmaTrend::Neutral)
    }
}

impl RsiCondition {
    pub fn is_neutral(&self) -> bool {
        matches!(self, RsiCondition::Neutral)
    }
}

impl MacdMomentum {
    pub fn is_neutral(&self) -> bool {
        matches!(self, MacdMomentum::Neutral)
    }
}

impl fmt::Display for EmaTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmaTrend::Bullish => write!(f, "bullish"),
            EmaTrend::Bearish => write!(f, "bearish"),
            EmaTrend::Neutral => write!(f, "neutral"),
        }
    }
}

impl fmt::Display for RsiCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsiCondition::Oversold => write!(f, "oversold"),
            RsiCondition::Overbought => write!(f, "overbought"),
            RsiCondition::Neutral => write!(f, "neutral"),
        }
    }
}

impl fmt::Display for MacdMomentum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacdMomentum::Bullish => write!(f, "bullish"),
            MacdMomentum::Bearish => write!(f, "bearish"),
            MacdMomentum::Neutral => write!(f, "neutral"),
        }
    }
}

/// Classifications of all three indicators over one price window.
///
/// Derived data: a snapshot only persists as part of the Signal that used it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IndicatorSnapshot {
    pub ema: EmaTrend,
    pub rsi: RsiCondition,
    pub macd: MacdMomentum,
}

impl IndicatorSnapshot {
    /// Whether every indicator fired (none neutral).
    pub fn fully_aligned(&self) -> bool {
        !self.ema.is_neutral() && !self.rsi.is_neutral() && !self.macd.is_neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_default_is_neutral() {
        let snapshot = IndicatorSnapshot::default();
        assert!(snapshot.ema.is_neutral());
        assert!(snapshot.rsi.is_neutral());
        assert!(snapshot.macd.is_neutral());
        assert!(!snapshot.fully_aligned());
    }

    #[test]
    fn test_serde_wire_strings() {
        let snapshot = IndicatorSnapshot {
            ema: EmaTrend::Bullish,
            rsi: RsiCondition::Oversold,
            macd: MacdMomentum::Bearish,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(
            json,
            r#"{"ema":"bullish","rsi":"oversold","macd":"bearish"}"#
        );
    }
}
