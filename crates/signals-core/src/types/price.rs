//! Price point and bounded price series types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::{Timeframe, TradingPair};

/// A single observed price at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Closing price of the candle
    pub price: f64,
    /// Candle close time
    pub timestamp: DateTime<Utc>,
}

impl PricePoint {
    /// Create a new price point.
    pub fn new(price: f64, timestamp: DateTime<Utc>) -> Self {
        Self { price, timestamp }
    }
}

/// Bounded, ordered window of recent prices for a pair at a timeframe.
///
/// Points are kept oldest-first; pushing past capacity evicts the oldest.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    /// Pair the prices belong to
    pub pair: TradingPair,
    /// Candle timeframe
    pub timeframe: Timeframe,
    points: VecDeque<PricePoint>,
    capacity: usize,
}

impl PriceSeries {
    /// Default window size, enough for the slowest indicator plus headroom.
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Create an empty series with the default capacity.
    pub fn new(pair: TradingPair, timeframe: Timeframe) -> Self {
        Self::with_capacity(pair, timeframe, Self::DEFAULT_CAPACITY)
    }

    /// Create an empty series with an explicit capacity.
    pub fn with_capacity(pair: TradingPair, timeframe: Timeframe, capacity: usize) -> Self {
        Self {
            pair,
            timeframe,
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a point, evicting the oldest when at capacity.
    pub fn push(&mut self, point: PricePoint) {
        if self.capacity > 0 && self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Push multiple points in order.
    pub fn extend(&mut self, points: impl IntoIterator<Item = PricePoint>) {
        for point in points {
            self.push(point);
        }
    }

    /// Number of points in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the window is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent point.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.back()
    }

    /// Closing prices oldest-first.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Iterator over points oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter()
    }
}
