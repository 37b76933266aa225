//! Upstream price sources for the signal engine.
//!
//! Two concrete [`signals_core::PriceSeriesProvider`] implementations:
//! Binance klines for crypto pairs and Alpha Vantage FX intraday for
//! forex pairs. Both report routine upstream failures as
//! `SeriesFetch::Unavailable` so the orchestrator can skip the cycle and
//! retry, never as fabricated prices.

mod binance;
mod forex;

pub use binance::BinanceProvider;
pub use forex::AlphaVantageProvider;
