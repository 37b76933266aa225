//! Configuration structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use signals_core::{EngineError, EngineResult, MarketType, Timeframe, TradingPair};
use signals_engine::{FactoryConfig, OrchestratorConfig};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub levels: FactoryConfig,
    #[serde(default)]
    pub schedule: ScheduleSettings,
    #[serde(default)]
    pub sources: SourceSettings,
    #[serde(default)]
    pub pairs: PairSettings,
}

impl AppConfig {
    /// Validate the whole configuration, including pair parsing.
    pub fn validate(&self) -> EngineResult<()> {
        self.levels
            .validate()
            .map_err(|e| EngineError::Config(e.to_string()))?;
        self.schedule.validate()?;
        self.pairs.universe()?;
        self.pairs.timeframes()?;
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "signal-engine".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Whether the configured format selects the JSON log layer.
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Cadence and resource limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSettings {
    /// Seconds between generation cycles
    pub generation_secs: u64,
    /// Seconds between re-evaluation cycles
    pub reevaluation_secs: u64,
    /// Maximum concurrent work items per cycle
    pub concurrency: usize,
    /// Per-fetch upstream timeout in seconds
    pub fetch_timeout_secs: u64,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            generation_secs: 900,
            reevaluation_secs: 300,
            concurrency: 8,
            fetch_timeout_secs: 10,
        }
    }
}

impl ScheduleSettings {
    fn validate(&self) -> EngineResult<()> {
        if self.generation_secs == 0 || self.reevaluation_secs == 0 {
            return Err(EngineError::Config("Cycle intervals must be positive".into()));
        }
        if self.concurrency == 0 {
            return Err(EngineError::Config("Concurrency must be at least 1".into()));
        }
        Ok(())
    }
}

impl From<&ScheduleSettings> for OrchestratorConfig {
    fn from(settings: &ScheduleSettings) -> Self {
        Self {
            generation_interval: Duration::from_secs(settings.generation_secs),
            reevaluation_interval: Duration::from_secs(settings.reevaluation_secs),
            concurrency: settings.concurrency,
            fetch_timeout: Duration::from_secs(settings.fetch_timeout_secs),
        }
    }
}

/// Upstream source endpoints and credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub binance_base_url: String,
    pub alpha_vantage_base_url: String,
    /// Environment variable holding the Alpha Vantage API key
    pub alpha_vantage_api_key_env: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            binance_base_url: "https://api.binance.com/api/v3".to_string(),
            alpha_vantage_base_url: "https://www.alphavantage.co/query".to_string(),
            alpha_vantage_api_key_env: "ALPHA_VANTAGE_API_KEY".to_string(),
        }
    }
}

impl SourceSettings {
    /// Read the Alpha Vantage API key from the configured variable.
    pub fn alpha_vantage_api_key(&self) -> Option<String> {
        std::env::var(&self.alpha_vantage_api_key_env).ok()
    }
}

/// The tracked pair universe and timeframe matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PairSettings {
    pub crypto: Vec<String>,
    pub forex: Vec<String>,
    pub timeframes: Vec<String>,
}

impl Default for PairSettings {
    fn default() -> Self {
        Self {
            crypto: ["BTC/USDT", "ETH/USDT", "BNB/USDT", "ADA/USDT", "SOL/USDT"]
                .map(String::from)
                .to_vec(),
            forex: [
                "EUR/USD", "GBP/USD", "USD/JPY", "USD/CHF", "AUD/USD", "USD/CAD", "EUR/GBP",
                "EUR/JPY", "GBP/JPY", "AUD/JPY", "EUR/CHF", "USD/INR", "USD/CNY", "USD/BRL",
                "USD/MXN", "USD/ZAR",
            ]
            .map(String::from)
            .to_vec(),
            timeframes: ["5m", "15m"].map(String::from).to_vec(),
        }
    }
}

impl PairSettings {
    /// Parse the configured pairs into the generation universe.
    pub fn universe(&self) -> EngineResult<Vec<(TradingPair, MarketType)>> {
        let mut universe = Vec::with_capacity(self.crypto.len() + self.forex.len());
        for (pairs, market) in [
            (&self.crypto, MarketType::Crypto),
            (&self.forex, MarketType::Forex),
        ] {
            for raw in pairs {
                let pair = raw.parse().map_err(EngineError::Config)?;
                universe.push((pair, market));
            }
        }
        Ok(universe)
    }

    /// Parse the configured timeframes.
    pub fn timeframes(&self) -> EngineResult<Vec<Timeframe>> {
        self.timeframes
            .iter()
            .map(|raw| raw.parse().map_err(EngineError::Config))
            .collect()
    }
}
