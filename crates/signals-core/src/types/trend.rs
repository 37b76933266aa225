//! Market trend state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate market trend verdict for a pair+timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Sideways,
    /// Initial state before any evaluation has run.
    #[default]
    Unknown,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Bullish => write!(f, "bullish"),
            Trend::Bearish => write!(f, "bearish"),
            Trend::Sideways => write!(f, "sideways"),
            Trend::Unknown => write!(f, "unknown"),
        }
    }
}

/// Trend verdict with strength, owned by the pair+timeframe context.
///
/// Copied (not shared) into each Signal at creation and on re-evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendState {
    pub current_trend: Trend,
    /// Strength score in 0–100
    pub trend_strength: f64,
    pub last_updated: DateTime<Utc>,
}

impl TrendState {
    /// Create a trend state stamped with the given time.
    pub fn new(current_trend: Trend, trend_strength: f64, last_updated: DateTime<Utc>) -> Self {
        Self {
            current_trend,
            trend_strength,
            last_updated,
        }
    }

    /// State before any evaluation has run.
    pub fn unknown(at: DateTime<Utc>) -> Self {
        Self::new(Trend::Unknown, 0.0, at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_state() {
        let state = TrendState::unknown(Utc::now());
        assert_eq!(state.current_trend, Trend::Unknown);
        assert_eq!(state.trend_strength, 0.0);
    }

    #[test]
    fn test_trend_wire_strings() {
        assert_eq!(serde_json::to_string(&Trend::Bullish).unwrap(), "\"bullish\"");
        assert_eq!(serde_json::to_string(&Trend::Sideways).unwrap(), "\"sideways\"");
    }
}
