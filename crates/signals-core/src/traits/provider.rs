//! Price series provider trait.

use async_trait::async_trait;

use crate::error::DataError;
use crate::types::{MarketType, PriceSeries, Timeframe, TradingPair};

/// Result of a series fetch.
///
/// Routine upstream outages are reported as `Unavailable` so callers can
/// distinguish a skipped cycle from real data; errors are reserved for
/// broken requests and misconfiguration.
#[derive(Debug)]
pub enum SeriesFetch {
    /// Real prices from the upstream source, oldest-first
    Available(PriceSeries),
    /// The source could not produce data this cycle
    Unavailable { reason: String },
}

/// Source of bounded recent price windows for one market type.
#[async_trait]
pub trait PriceSeriesProvider: Send + Sync {
    /// Fetch the recent price window for a pair at a timeframe.
    ///
    /// Returns `SeriesFetch::Unavailable` when the upstream source is
    /// down, rate-limited, or times out; the work item is skipped for
    /// the cycle and retried on the next one.
    async fn fetch_series(
        &self,
        pair: &TradingPair,
        timeframe: Timeframe,
    ) -> Result<SeriesFetch, DataError>;

    /// Market type this provider serves.
    fn market(&self) -> MarketType;

    /// Provider name for logging.
    fn name(&self) -> &str;
}
