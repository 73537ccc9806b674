//! Price command implementation

use super::build_monitor;
use crate::alert::{TargetReport, TargetStatus};
use crate::config::Config;
use crate::subscriber::SubscriberId;
use clap::Args;

#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Print the observation as JSON
    #[arg(long)]
    pub json: bool,

    /// Also report this subscriber's distance to its targets
    #[arg(long)]
    pub subscriber: Option<i64>,
}

impl PriceArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let monitor = build_monitor(config).await?;

        let report = match self.subscriber {
            Some(id) => Some(monitor.target_report(SubscriberId(id)).await?),
            None => None,
        };

        if self.json {
            match &report {
                Some(report) => println!("{}", serde_json::to_string_pretty(report)?),
                None => println!(
                    "{}",
                    serde_json::to_string_pretty(&monitor.current_price().await?)?
                ),
            }
            return Ok(());
        }

        let observation = match &report {
            Some(report) => report.observation.clone(),
            None => monitor.current_price().await?,
        };

        println!("{} price", config.source.coin_id);
        println!("  Price:      {} {}", observation.price, config.source.vs_currency);
        println!("  24h change: {}%", observation.change_24h.round_dp(2));
        if let Some(cap) = observation.market_cap {
            println!("  Market cap: {}", cap.round_dp(0));
        }
        println!("  Source:     {}", observation.source);
        println!("  Updated:    {}", observation.observed_at.to_rfc3339());

        if let Some(report) = &report {
            print_targets(report);
        }
        Ok(())
    }
}

fn print_targets(report: &TargetReport) {
    if report.max.is_none() && report.min.is_none() {
        println!("  Targets:    none set");
        return;
    }
    for status in [&report.max, &report.min].into_iter().flatten() {
        println!("  {}", describe(status));
    }
}

fn describe(status: &TargetStatus) -> String {
    let distance = status
        .distance_pct
        .map(|d| format!("{}%", d.round_dp(2)))
        .unwrap_or_else(|| "n/a".to_string());
    let state = match (status.reached, status.triggered) {
        (_, true) => "triggered",
        (true, false) => "reached",
        (false, false) => "pending",
    };
    format!(
        "{:<11} {} ({}, {})",
        format!("{}:", status.side),
        status.target,
        distance,
        state
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscriber::TargetSide;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_describe_target() {
        let status = TargetStatus {
            side: TargetSide::Max,
            target: dec!(1.2),
            distance_pct: Some(dec!(20)),
            reached: false,
            triggered: false,
        };
        assert_eq!(describe(&status), "max:        1.2 (20%, pending)");

        let overflowed = TargetStatus {
            distance_pct: None,
            target: Decimal::MAX,
            triggered: true,
            ..status
        };
        assert!(describe(&overflowed).ends_with("(n/a, triggered)"));
    }
}
