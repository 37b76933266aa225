//! Core types and traits for the signal engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (PricePoint, PriceSeries)
//! - The Signal entity and its lifecycle statuses
//! - Indicator classifications and market trend state
//! - Trait seams for price providers, the signal store, and event publishing

pub mod types;
pub mod traits;
pub mod error;

pub use error::{DataError, EngineError, EngineResult, SignalError, StoreError};
pub use types::*;
pub use traits::*;
