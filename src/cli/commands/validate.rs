//! Validate configuration command.

use anyhow::Result;
use std::path::Path;

use signals_config::load_config;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path).map_err(anyhow::Error::from).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Stop loss: {}%", config.levels.stop_loss_pct);
            println!("Take profit 1: {}%", config.levels.take_profit_1_pct);
            println!("Take profit 2: {}%", config.levels.take_profit_2_pct);
            println!("Validity: {}h", config.levels.validity_hours);
            println!(
                "Pairs: {} crypto, {} forex",
                config.pairs.crypto.len(),
                config.pairs.forex.len()
            );
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
