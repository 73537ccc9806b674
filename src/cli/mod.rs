//! CLI interface for pricewatch
//!
//! Provides subcommands for:
//! - `run`: Start the price monitor
//! - `price`: Fetch the current price once, optionally with a target report
//! - `config`: Show configuration

mod price;
mod run;

pub use price::PriceArgs;
pub use run::RunArgs;

use crate::config::Config;
use crate::history::PriceHistory;
use crate::monitor::PriceMonitor;
use crate::notify::LogSink;
use crate::subscriber::SubscriberStore;
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "pricewatch")]
#[command(about = "Price monitor with change and target alerts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the price monitor
    Run(RunArgs),
    /// Fetch the current price once
    Price(PriceArgs),
    /// Show configuration
    Config,
}

/// Monitor over the configured sources, logging notifications, with seeds applied
pub(crate) async fn build_monitor(config: &Config) -> anyhow::Result<PriceMonitor> {
    let source = config.source.build_source()?;
    let store = Arc::new(SubscriberStore::with_default_threshold(
        config.alerts.default_threshold_pct,
    ));

    let monitor = PriceMonitor::new(
        Arc::new(source),
        store,
        Arc::new(PriceHistory::new()),
        Arc::new(LogSink),
    );

    for seed in &config.subscribers {
        let id = seed.subscriber_id();
        monitor.register_subscriber(id).await;
        for command in seed.commands() {
            monitor.apply_command(id, &command).await?;
        }
    }
    Ok(monitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from(["pricewatch", "run", "--once"]).unwrap();
        assert_eq!(cli.config, "config.toml");
        assert!(matches!(cli.command, Commands::Run(RunArgs { once: true })));
    }

    #[test]
    fn test_parse_price_with_config() {
        let cli =
            Cli::try_parse_from(["pricewatch", "--config", "alt.toml", "price", "--json"]).unwrap();
        assert_eq!(cli.config, "alt.toml");
        assert!(matches!(
            cli.command,
            Commands::Price(PriceArgs {
                json: true,
                subscriber: None
            })
        ));
    }

    #[test]
    fn test_parse_price_for_subscriber() {
        let cli = Cli::try_parse_from(["pricewatch", "price", "--subscriber", "1001"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Price(PriceArgs {
                json: false,
                subscriber: Some(1001)
            })
        ));
    }
}
