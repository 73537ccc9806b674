//! Configuration types for pricewatch

use crate::feed::{
    CoinGeckoClient, CoinGeckoConfig, DexScreenerClient, DexScreenerConfig, FallbackSource,
    FeedError, COINGECKO_API_URL, DEXSCREENER_API_URL,
};
use crate::subscriber::{ConfigCommand, SubscriberId, TargetSide, DEFAULT_THRESHOLD_PCT};
use crate::telemetry::LogFormat;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
    pub telemetry: TelemetryConfig,
    /// Subscribers registered at startup
    #[serde(default)]
    pub subscribers: Vec<SubscriberSeed>,
}

/// Price provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_coingecko_url")]
    pub coingecko_url: String,
    /// CoinGecko coin id of the tracked asset
    pub coin_id: String,
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,
    #[serde(default = "default_dexscreener_url")]
    pub dexscreener_url: String,
    /// DexScreener search query for the tracked asset
    pub search_query: String,
    /// Per-request timeout, bounds a hung fetch
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_coingecko_url() -> String {
    COINGECKO_API_URL.to_string()
}
fn default_vs_currency() -> String {
    "usd".to_string()
}
fn default_dexscreener_url() -> String {
    DEXSCREENER_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl SourceConfig {
    pub fn coingecko(&self) -> CoinGeckoConfig {
        CoinGeckoConfig {
            base_url: self.coingecko_url.clone(),
            coin_id: self.coin_id.clone(),
            vs_currency: self.vs_currency.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn dexscreener(&self) -> DexScreenerConfig {
        DexScreenerConfig {
            base_url: self.dexscreener_url.clone(),
            search_query: self.search_query.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// CoinGecko as primary, DexScreener as fallback
    pub fn build_source(&self) -> Result<FallbackSource, FeedError> {
        let primary = CoinGeckoClient::with_config(self.coingecko())?;
        let secondary = DexScreenerClient::with_config(self.dexscreener())?;
        Ok(FallbackSource::new(Box::new(primary), Box::new(secondary)))
    }
}

/// Poll scheduling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Global poll interval; there is no per-subscriber schedule
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval_secs() -> u64 {
    60
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Defaults applied to new subscribers
#[derive(Debug, Clone, Deserialize)]
pub struct AlertsConfig {
    #[serde(default = "default_threshold_pct")]
    pub default_threshold_pct: u32,
}

fn default_threshold_pct() -> u32 {
    DEFAULT_THRESHOLD_PCT
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            default_threshold_pct: DEFAULT_THRESHOLD_PCT,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; no exporter when absent
    pub metrics_port: Option<u16>,
}

/// A subscriber registered from the config file
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriberSeed {
    pub id: i64,
    pub alerts_enabled: Option<bool>,
    pub threshold_pct: Option<u32>,
    pub max_target: Option<Decimal>,
    pub min_target: Option<Decimal>,
}

impl SubscriberSeed {
    pub fn subscriber_id(&self) -> SubscriberId {
        SubscriberId(self.id)
    }

    /// Commands that bring a default config to this seed's settings
    pub fn commands(&self) -> Vec<ConfigCommand> {
        let mut commands = Vec::new();
        if let Some(enabled) = self.alerts_enabled {
            commands.push(ConfigCommand::SetAlertsEnabled(enabled));
        }
        if let Some(threshold) = self.threshold_pct {
            commands.push(ConfigCommand::SetThreshold(threshold));
        }
        if let Some(price) = self.max_target {
            commands.push(ConfigCommand::SetTarget {
                side: TargetSide::Max,
                price,
            });
        }
        if let Some(price) = self.min_target {
            commands.push(ConfigCommand::SetTarget {
                side: TargetSide::Min,
                price,
            });
        }
        commands
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the monitor cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.monitor.poll_interval_secs == 0 {
            anyhow::bail!("monitor.poll_interval_secs must be greater than zero");
        }
        if self.source.timeout_secs == 0 {
            anyhow::bail!("source.timeout_secs must be greater than zero");
        }
        ConfigCommand::SetThreshold(self.alerts.default_threshold_pct)
            .validate()
            .map_err(|e| anyhow::anyhow!("alerts.default_threshold_pct: {}", e))?;
        for seed in &self.subscribers {
            for command in seed.commands() {
                command
                    .validate()
                    .map_err(|e| anyhow::anyhow!("subscriber {}: {}", seed.id, e))?;
            }
        }
        Ok(())
    }
}
