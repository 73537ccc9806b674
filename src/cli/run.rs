//! Run command implementation

use super::build_monitor;
use crate::config::Config;
use clap::Args;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Run a single poll pass and exit
    #[arg(long)]
    pub once: bool,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let monitor = build_monitor(config).await?;

        if self.once {
            let outcome = monitor.on_tick().await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            return Ok(());
        }

        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        };

        monitor
            .run(config.monitor.poll_interval(), shutdown)
            .await;
        Ok(())
    }
}
