//! Trading pair and market type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Market a pair trades on, selecting the price source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    Crypto,
    Forex,
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketType::Crypto => write!(f, "crypto"),
            MarketType::Forex => write!(f, "forex"),
        }
    }
}

/// A base/quote trading pair, e.g. `BTC/USDT` or `EUR/USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TradingPair {
    base: String,
    quote: String,
}

impl TradingPair {
    /// Create a pair from base and quote currencies.
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into().to_uppercase(),
            quote: quote.into().to_uppercase(),
        }
    }

    /// Base currency, e.g. `BTC` in `BTC/USDT`.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Quote currency, e.g. `USDT` in `BTC/USDT`.
    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// Concatenated exchange symbol without separator, e.g. `BTCUSDT`.
    pub fn symbol(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for TradingPair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .split_once('/')
            .ok_or_else(|| format!("Invalid pair (expected BASE/QUOTE): {}", s))?;
        if base.is_empty() || quote.is_empty() {
            return Err(format!("Invalid pair (empty side): {}", s));
        }
        Ok(Self::new(base, quote))
    }
}

impl TryFrom<String> for TradingPair {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TradingPair> for String {
    fn from(pair: TradingPair) -> Self {
        pair.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_parse() {
        let pair: TradingPair = "BTC/USDT".parse().unwrap();
        assert_eq!(pair.base(), "BTC");
        assert_eq!(pair.quote(), "USDT");
        assert_eq!(pair.symbol(), "BTCUSDT");
        assert_eq!(pair.to_string(), "BTC/USDT");
    }

    #[test]
    fn test_pair_parse_lowercase() {
        let pair: TradingPair = "eur/usd".parse().unwrap();
        assert_eq!(pair.to_string(), "EUR/USD");
    }

    #[test]
    fn test_pair_parse_invalid() {
        assert!("BTCUSDT".parse::<TradingPair>().is_err());
        assert!("BTC/".parse::<TradingPair>().is_err());
        assert!("/USDT".parse::<TradingPair>().is_err());
    }
}
