//! List the configured pair universe.

use anyhow::{Context, Result};
use std::path::Path;

use signals_config::load_config;

pub async fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)
        .with_context(|| format!("failed to load config from {:?}", config_path))?;

    let universe = config.pairs.universe()?;
    let timeframes = config.pairs.timeframes()?;

    println!("Tracked pairs ({}):", universe.len());
    for (pair, market) in &universe {
        println!("  {pair}  [{market:?}]");
    }
    println!();
    println!(
        "Timeframes: {}",
        timeframes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(())
}
