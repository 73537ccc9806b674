//! Price feed module
//!
//! Fetches the tracked asset's price from CoinGecko, falling back to
//! DexScreener when the primary provider has no usable answer.

mod coingecko;
mod dexscreener;
mod fallback;
mod types;

pub use coingecko::{CoinGeckoClient, CoinGeckoConfig, COINGECKO_API_URL};
pub use dexscreener::{DexScreenerClient, DexScreenerConfig, DEXSCREENER_API_URL};
pub use fallback::FallbackSource;
pub use types::{FeedError, PriceObservation, Quote};

use async_trait::async_trait;

/// A single upstream price provider
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Short provider name used in logs and observations
    fn name(&self) -> &'static str;
    /// Fetch the current quote
    async fn fetch_quote(&self) -> Result<Quote, FeedError>;
}

/// Source of price observations consumed by the monitor
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the current observation
    async fn fetch(&self) -> Result<PriceObservation, FeedError>;
}
