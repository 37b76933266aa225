//! Timeframe definitions for price series.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Candle timeframe for a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    /// 5 minute candles
    #[serde(rename = "5m")]
    Minute5,
    /// 15 minute candles
    #[serde(rename = "15m")]
    #[default]
    Minute15,
    /// 1 hour candles
    #[serde(rename = "1h")]
    Hour1,
    /// 4 hour candles
    #[serde(rename = "4h")]
    Hour4,
    /// Daily candles
    #[serde(rename = "1d")]
    Daily,
}

impl Timeframe {
    /// Duration of one candle in seconds.
    pub fn as_secs(&self) -> u64 {
        match self {
            Timeframe::Minute5 => 300,
            Timeframe::Minute15 => 900,
            Timeframe::Hour1 => 3600,
            Timeframe::Hour4 => 14400,
            Timeframe::Daily => 86400,
        }
    }

}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Timeframe::Minute5 => "5m",
            Timeframe::Minute15 => "15m",
            Timeframe::Hour1 => "1h",
            Timeframe::Hour4 => "4h",
            Timeframe::Daily => "1d",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "5m" | "5min" => Ok(Timeframe::Minute5),
            "15m" | "15min" => Ok(Timeframe::Minute15),
            "1h" | "60min" | "hour" => Ok(Timeframe::Hour1),
            "4h" => Ok(Timeframe::Hour4),
            "1d" | "day" | "daily" => Ok(Timeframe::Daily),
            _ => Err(format!("Invalid timeframe: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_duration() {
        assert_eq!(Timeframe::Minute5.as_secs(), 300);
        assert_eq!(Timeframe::Minute15.as_secs(), 900);
        assert_eq!(Timeframe::Daily.as_secs(), 86400);
    }

    #[test]
    fn test_timeframe_parse() {
        assert_eq!(Timeframe::from_str("5m").unwrap(), Timeframe::Minute5);
        assert_eq!(Timeframe::from_str("15min").unwrap(), Timeframe::Minute15);
        assert_eq!(Timeframe::from_str("daily").unwrap(), Timeframe::Daily);
        assert!(Timeframe::from_str("2m").is_err());
    }

    #[test]
    fn test_timeframe_display() {
        assert_eq!(Timeframe::Minute15.to_string(), "15m");
        assert_eq!(Timeframe::Hour4.to_string(), "4h");
    }
}
