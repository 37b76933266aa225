//! Indicator computation and trend classification.
//!
//! Pure, deterministic math over closing-price windows:
//! - EMA(20)/EMA(50) crossover classification
//! - RSI(14) overbought/oversold classification
//! - MACD (EMA12 − EMA26) momentum classification
//!
//! Every indicator fails soft: a window too short for its minimum length
//! classifies as neutral instead of erroring.

pub mod engine;
pub mod momentum;
pub mod moving_average;
pub mod trend;

pub use engine::IndicatorEngine;
pub use momentum::{Macd, Rsi};
pub use moving_average::{ema, EmaCross};
pub use trend::TrendClassifier;
