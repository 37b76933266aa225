//! Logging setup and aggregate signal statistics.

mod logging;
mod stats;

pub use logging::setup_logging;
pub use stats::SignalStats;
