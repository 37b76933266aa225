//! Error types for the signal engine.

use thiserror::Error;

/// Top-level engine error.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Price source errors.
///
/// Routine upstream outages are not errors: providers report them as
/// [`crate::traits::SeriesFetch::Unavailable`] so a cycle can skip the
/// work item and retry later. These variants cover genuinely broken
/// requests and misconfiguration.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Unsupported pair: {0}")]
    UnsupportedPair(String),

    #[error("Invalid timeframe: {0}")]
    InvalidTimeframe(String),

    #[error("Missing API key: set {0}")]
    MissingApiKey(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Data source error: {0}")]
    Internal(String),
}

/// Signal construction errors.
///
/// A candidate that violates its own level invariants is discarded and
/// logged as a data-quality event, never persisted.
#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Invalid price levels: {0}")]
    InvalidLevels(String),

    #[error("Non-positive risk: entry {entry}, stop loss {stop_loss}")]
    NonPositiveRisk { entry: f64, stop_loss: f64 },

    #[error("Non-positive entry price: {0}")]
    NonPositivePrice(f64),
}

/// Signal store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Signal not found: {0}")]
    NotFound(uuid::Uuid),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Store error: {0}")]
    Internal(String),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
