//! Binance klines price source for crypto pairs.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use serde_json::Value;
use tracing::debug;

use signals_core::{
    DataError, MarketType, PricePoint, PriceSeries, PriceSeriesProvider, SeriesFetch, Timeframe,
    TradingPair,
};

/// Number of candles requested per window.
const KLINE_LIMIT: usize = 100;

/// Fetches recent klines from the Binance REST API.
pub struct BinanceProvider {
    client: reqwest::Client,
    base_url: String,
}

impl BinanceProvider {
    /// Default public API endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.binance.com/api/v3";

    /// Create a provider with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DataError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::Internal(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

/// Parse a klines response body into a price series.
///
/// Each kline is an array; index 4 is the close price (as a string) and
/// index 6 the close time in epoch milliseconds.
fn parse_klines(
    body: &Value,
    pair: &TradingPair,
    timeframe: Timeframe,
) -> Result<PriceSeries, DataError> {
    let klines = body
        .as_array()
        .ok_or_else(|| DataError::ParseError("klines response is not an array".into()))?;

    let mut series = PriceSeries::with_capacity(pair.clone(), timeframe, KLINE_LIMIT);
    for kline in klines {
        let fields = kline
            .as_array()
            .ok_or_else(|| DataError::ParseError("kline entry is not an array".into()))?;
        let close = fields
            .get(4)
            .and_then(Value::as_str)
            .ok_or_else(|| DataError::ParseError("kline missing close price".into()))?
            .parse::<f64>()
            .map_err(|e| DataError::ParseError(format!("bad close price: {}", e)))?;
        let close_time = fields
            .get(6)
            .and_then(Value::as_i64)
            .ok_or_else(|| DataError::ParseError("kline missing close time".into()))?;
        let timestamp = DateTime::from_timestamp_millis(close_time)
            .ok_or_else(|| DataError::ParseError(format!("bad close time: {}", close_time)))?;
        series.push(PricePoint::new(close, timestamp));
    }
    Ok(series)
}

#[async_trait]
impl PriceSeriesProvider for BinanceProvider {
    async fn fetch_series(
        &self,
        pair: &TradingPair,
        timeframe: Timeframe,
    ) -> Result<SeriesFetch, DataError> {
        let url = format!("{}/klines", self.base_url);
        let response = match self
            .client
            .get(&url)
            .query(&[
                ("symbol", pair.symbol()),
                ("interval", timeframe.to_string()),
                ("limit", KLINE_LIMIT.to_string()),
            ])
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                debug!(%pair, error = %err, "binance request failed");
                return Ok(SeriesFetch::Unavailable {
                    reason: format!("request failed: {}", err),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Ok(SeriesFetch::Unavailable {
                reason: format!("binance returned {}", status),
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

        let series = parse_klines(&body, pair, timeframe)?;
        if series.is_empty() {
            return Ok(SeriesFetch::Unavailable {
                reason: "binance returned no klines".into(),
            });
        }
        Ok(SeriesFetch::Available(series))
    }

    fn market(&self) -> MarketType {
        MarketType::Crypto
    }

    fn name(&self) -> &str {
        "binance"
    }
}
