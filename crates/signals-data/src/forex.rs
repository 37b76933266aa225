//! Alpha Vantage FX intraday price source for forex pairs.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::debug;

use signals_core::{
    DataError, MarketType, PricePoint, PriceSeries, PriceSeriesProvider, SeriesFetch, Timeframe,
    TradingPair,
};

/// Maximum points kept from one response.
const SERIES_LIMIT: usize = 100;

/// Fetches FX intraday series from the Alpha Vantage API.
///
/// Without an API key every fetch reports `Unavailable`, so a crypto-only
/// deployment keeps running with forex items skipped each cycle.
pub struct AlphaVantageProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl AlphaVantageProvider {
    /// Default public API endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://www.alphavantage.co/query";

    /// Create a provider with a per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, DataError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::Internal(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
        })
    }

    /// Alpha Vantage interval parameter for a timeframe.
    fn interval(timeframe: Timeframe) -> &'static str {
        match timeframe {
            Timeframe::Minute5 => "5min",
            Timeframe::Minute15 => "15min",
            Timeframe::Hour1 => "60min",
            Timeframe::Hour4 | Timeframe::Daily => "daily",
        }
    }
}

/// Parse an FX intraday response into a price series.
///
/// The payload keys the series under `Time Series FX (<interval>)` with
/// newest-first timestamps mapping to bars whose close is `4. close`.
/// Rate-limit notes and error messages come back as 200 responses with
/// an informational key instead, which reads as unavailability.
fn parse_fx_series(
    body: &Value,
    pair: &TradingPair,
    timeframe: Timeframe,
) -> Result<Option<PriceSeries>, DataError> {
    let object = body
        .as_object()
        .ok_or_else(|| DataError::ParseError("fx response is not an object".into()))?;

    let Some((_, entries)) = object
        .iter()
        .find(|(key, _)| key.starts_with("Time Series FX"))
    else {
        // "Note" (rate limit) or "Error Message"; no series either way.
        return Ok(None);
    };
    let entries = entries
        .as_object()
        .ok_or_else(|| DataError::ParseError("fx time series is not an object".into()))?;

    // Keys are "YYYY-MM-DD HH:MM:SS": lexicographic order is time order.
    let mut timestamps: Vec<&String> = entries.keys().collect();
    timestamps.sort();
    let oldest_kept = timestamps.len().saturating_sub(SERIES_LIMIT);

    let mut series = PriceSeries::with_capacity(pair.clone(), timeframe, SERIES_LIMIT);
    for key in &timestamps[oldest_kept..] {
        let close = entries[*key]
            .get("4. close")
            .and_then(Value::as_str)
            .ok_or_else(|| DataError::ParseError("fx bar missing close".into()))?
            .parse::<f64>()
            .map_err(|e| DataError::ParseError(format!("bad fx close: {}", e)))?;
        let timestamp = NaiveDateTime::parse_from_str(key, "%Y-%m-%d %H:%M:%S")
            .map_err(|e| DataError::ParseError(format!("bad fx timestamp {}: {}", key, e)))?
            .and_utc();
        series.push(PricePoint::new(close, timestamp));
    }
    Ok(Some(series))
}

#[async_trait]
impl PriceSeriesProvider for AlphaVantageProvider {
    async fn fetch_series(
        &self,
        pair: &TradingPair,
        timeframe: Timeframe,
    ) -> Result<SeriesFetch, DataError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(SeriesFetch::Unavailable {
                reason: "no Alpha Vantage API key configured".into(),
            });
        };

        let response = match self
            .client
            .get(&self.base_url)
            .query(&[
                ("function", "FX_INTRADAY"),
                ("from_symbol", pair.base()),
                ("to_symbol", pair.quote()),
                ("interval", Self::interval(timeframe)),
                ("apikey", api_key),
            ])
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                debug!(%pair, error = %err, "alpha vantage request failed");
                return Ok(SeriesFetch::Unavailable {
                    reason: format!("request failed: {}", err),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Ok(SeriesFetch::Unavailable {
                reason: format!("alpha vantage returned {}", status),
            });
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                return Ok(SeriesFetch::Unavailable {
                    reason: format!("undecodable response: {}", err),
                })
            }
        };

        match parse_fx_series(&body, pair, timeframe)? {
            Some(series) if !series.is_empty() => Ok(SeriesFetch::Available(series)),
            _ => Ok(SeriesFetch::Unavailable {
                reason: "alpha vantage returned no series".into(),
            }),
        }
    }

    fn market(&self) -> MarketType {
        MarketType::Forex
    }

    fn name(&self) -> &str {
        "alpha_vantage"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_fx_series_sorted_oldest_first() {
        let body = json!({
            "Meta Data": {"1. Information": "FX Intraday (5min)"},
            "Time Series FX (5min)": {
                "2024-01-15 10:10:00": {"1. open": "1.0848", "4. close": "1.0850"},
                "2024-01-15 10:00:00": {"1. open": "1.0845", "4. close": "1.0846"},
                "2024-01-15 10:05:00": {"1. open": "1.0846", "4. close": "1.0848"}
            }
        });
        let pair: TradingPair = "EUR/USD".parse().unwrap();
        let series = parse_fx_series(&body, &pair, Timeframe::Minute5)
            .unwrap()
            .unwrap();

        assert_eq!(series.closes(), vec![1.0846, 1.0848, 1.0850]);
        assert_eq!(series.last().unwrap().price, 1.0850);
    }

    #[test]
    fn test_parse_fx_rate_limit_note_is_unavailable() {
        let body = json!({
            "Note": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day."
        });
        let pair: TradingPair = "EUR/USD".parse().unwrap();
        assert!(parse_fx_series(&body, &pair, Timeframe::Minute5)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_parse_fx_malformed_close_is_error() {
        let body = json!({
            "Time Series FX (5min)": {
                "2024-01-15 10:00:00": {"1. open": "1.0845"}
            }
        });
        let pair: TradingPair = "EUR/USD".parse().unwrap();
        assert!(parse_fx_series(&body, &pair, Timeframe::Minute5).is_err());
    }

    #[test]
    fn test_interval_mapping() {
        assert_eq!(AlphaVantageProvider::interval(Timeframe::Minute5), "5min");
        assert_eq!(AlphaVantageProvider::interval(Timeframe::Minute15), "15min");
        assert_eq!(AlphaVantageProvider::interval(Timeframe::Hour1), "60min");
        assert_eq!(AlphaVantageProvider::interval(Timeframe::Daily), "daily");
    }
}
