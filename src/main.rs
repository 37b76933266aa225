//! Signal engine CLI application.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use signals_config::LoggingConfig;
use signals_monitor::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging: CLI flags win, the config file's [logging] table is
    // the fallback. Config load errors are reported by the command itself.
    let logging = signals_config::load_config(&cli.config)
        .map(|config| config.logging)
        .unwrap_or_else(|_| LoggingConfig::default());
    let log_level: &str = match cli.log_level {
        Some(level) => level.as_str(),
        None => &logging.level,
    };
    setup_logging(log_level, cli.json_logs || logging.is_json());

    // Execute command
    match cli.command {
        Commands::Run(args) => cli::commands::run::run(args, &cli.config).await,
        Commands::Pairs => cli::commands::pairs::run(&cli.config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}
