//! Logging setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn setup_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().flatten_event(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_target(false))
            .init();
    }
}
