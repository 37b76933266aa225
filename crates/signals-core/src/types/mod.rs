//! Core data types for the signal engine.

mod indicator;
mod pair;
mod price;
mod signal;
mod timeframe;
mod trend;

pub use indicator::{EmaTrend, IndicatorSnapshot, MacdMomentum, RsiCondition};
pub use pair::{MarketType, TradingPair};
pub use price::{PricePoint, PriceSeries};
pub use signal::{Outcome, Recommendation, Signal, SignalStatus, PRICE_HISTORY_CAP};
pub use timeframe::Timeframe;
pub use trend::{Trend, TrendState};
