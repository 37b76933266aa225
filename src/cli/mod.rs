//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "signals")]
#[command(author, version, about = "Market signal generation and lifecycle engine")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (defaults to the config file's [logging] level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format (defaults to the config file's [logging] format)
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the signal engine
    Run(RunArgs),
    /// List the configured pair universe
    Pairs,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Override the generation interval (seconds)
    #[arg(long)]
    pub generation_secs: Option<u64>,

    /// Override the re-evaluation interval (seconds)
    #[arg(long)]
    pub reevaluation_secs: Option<u64>,

    /// Restrict to these pairs (comma-separated, e.g. BTC/USDT,EUR/USD)
    #[arg(short = 'P', long, value_delimiter = ',')]
    pub pairs: Vec<String>,
}
