use anyhow::Context;
use clap::Parser;
use pricewatch::cli::{Cli, Commands};
use pricewatch::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            Config::from_toml(include_str!("../config.toml.example"))
                .context("Invalid default config")?
        }
    };

    // Initialize telemetry
    let _telemetry = pricewatch::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting price monitor");
            args.execute(&config).await?;
        }
        Commands::Price(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Source: coingecko {} ({}), fallback dexscreener \"{}\"",
                config.source.coin_id, config.source.vs_currency, config.source.search_query
            );
            println!("  Timeout: {}s", config.source.timeout_secs);
            println!("  Poll interval: {}s", config.monitor.poll_interval_secs);
            println!(
                "  Default threshold: {}%",
                config.alerts.default_threshold_pct
            );
            println!("  Seeded subscribers: {}", config.subscribers.len());
        }
    }

    Ok(())
}
