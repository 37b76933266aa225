//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, LoggingConfig, PairSettings, ScheduleSettings, SourceSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables with the `SIGNALS` prefix override file values,
/// e.g. `SIGNALS__SCHEDULE__GENERATION_SECS=60`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("SIGNALS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
