//! Run the signal engine.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use signals_config::load_config;
use signals_data::{AlphaVantageProvider, BinanceProvider};
use signals_engine::{
    MemorySignalStore, Orchestrator, OrchestratorConfig, ProviderRouter, SignalFactory,
    TracingPublisher,
};

use crate::cli::RunArgs;

pub async fn run(args: RunArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)
        .with_context(|| format!("failed to load config from {:?}", config_path))?;
    config.validate().context("invalid configuration")?;

    let mut universe = config.pairs.universe()?;
    if !args.pairs.is_empty() {
        let wanted: Vec<signals_core::TradingPair> = args
            .pairs
            .iter()
            .map(|raw| raw.parse().map_err(anyhow::Error::msg))
            .collect::<Result<_>>()?;
        universe.retain(|(pair, _)| wanted.contains(pair));
        if universe.is_empty() {
            anyhow::bail!("none of the requested pairs are in the configured universe");
        }
    }
    let timeframes = config.pairs.timeframes()?;

    let mut orchestrator_config: OrchestratorConfig = (&config.schedule).into();
    if let Some(secs) = args.generation_secs {
        orchestrator_config.generation_interval = Duration::from_secs(secs);
    }
    if let Some(secs) = args.reevaluation_secs {
        orchestrator_config.reevaluation_interval = Duration::from_secs(secs);
    }

    let fetch_timeout = orchestrator_config.fetch_timeout;
    let crypto = BinanceProvider::new(&config.sources.binance_base_url, fetch_timeout)
        .context("failed to build crypto price source")?;
    let forex = AlphaVantageProvider::new(
        &config.sources.alpha_vantage_base_url,
        config.sources.alpha_vantage_api_key(),
        fetch_timeout,
    )
    .context("failed to build forex price source")?;
    let router = ProviderRouter::new(Arc::new(crypto), Arc::new(forex));

    let store = Arc::new(MemorySignalStore::new());
    let publisher = Arc::new(TracingPublisher::new());
    let factory = SignalFactory::new(config.levels.clone());

    let stats_period = orchestrator_config.generation_interval;
    let orchestrator = Arc::new(Orchestrator::new(
        router,
        Arc::clone(&store) as Arc<dyn signals_core::SignalStore>,
        publisher,
        factory,
        orchestrator_config,
        universe,
        timeframes,
    ));

    info!(app = %config.app.name, "signal engine starting");

    let stats = tokio::spawn(stats_loop(store, stats_period));

    tokio::select! {
        _ = orchestrator.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown requested");
        }
    }
    stats.abort();

    Ok(())
}

/// Periodically log aggregate performance over everything tracked so far.
async fn stats_loop(store: Arc<signals_engine::MemorySignalStore>, period: Duration) {
    use signals_core::SignalStore;
    use signals_monitor::SignalStats;

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        match store.all_signals().await {
            Ok(signals) => {
                let stats = SignalStats::compute(&signals);
                info!(
                    total = stats.total,
                    active = stats.active,
                    wins = stats.wins,
                    losses = stats.losses,
                    expired = stats.expired,
                    invalidated = stats.invalidated,
                    win_rate_pct = stats.win_rate,
                    avg_profit_loss_pct = stats.avg_profit_loss,
                    "signal statistics"
                );
            }
            Err(err) => tracing::warn!(error = %err, "failed to load signals for stats"),
        }
    }
}
