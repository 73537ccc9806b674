//! DexScreener search client (secondary provider)
//!
//! Uses the pair search endpoint and takes the first returned pair.

use super::types::{decimal_from_json, positive_price};
use super::{FeedError, PriceProvider, Quote};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// DexScreener API base URL
pub const DEXSCREENER_API_URL: &str = "https://api.dexscreener.com/latest/dex";

const PROVIDER: &str = "dexscreener";

/// Configuration for the DexScreener client
#[derive(Debug, Clone)]
pub struct DexScreenerConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Search query identifying the asset
    pub search_query: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            base_url: DEXSCREENER_API_URL.to_string(),
            search_query: "MORI".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for DexScreener's search endpoint
pub struct DexScreenerClient {
    config: DexScreenerConfig,
    client: Client,
}

impl DexScreenerClient {
    /// Create a client with the given configuration
    pub fn with_config(config: DexScreenerConfig) -> Result<Self, FeedError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }
}

/// Search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    pairs: Option<Vec<DexPair>>,
}

/// A trading pair in a search response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DexPair {
    /// USD price, sent as a string
    price_usd: Option<serde_json::Value>,
    price_change: Option<PriceChange>,
    market_cap: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PriceChange {
    h24: Option<serde_json::Value>,
}

/// Convert a search response into a quote using its first pair
fn parse_response(response: SearchResponse) -> Result<Quote, FeedError> {
    let pair = response
        .pairs
        .and_then(|pairs| pairs.into_iter().next())
        .ok_or(FeedError::MissingField {
            provider: PROVIDER,
            field: "pairs",
        })?;

    let raw_price = pair.price_usd.as_ref().ok_or(FeedError::MissingField {
        provider: PROVIDER,
        field: "priceUsd",
    })?;
    let price = positive_price(PROVIDER, raw_price)?;

    let change_24h = pair
        .price_change
        .and_then(|c| c.h24)
        .as_ref()
        .and_then(decimal_from_json)
        .unwrap_or(Decimal::ZERO);

    let market_cap = pair.market_cap.as_ref().and_then(decimal_from_json);

    Ok(Quote {
        price,
        change_24h,
        market_cap,
    })
}

#[async_trait]
impl PriceProvider for DexScreenerClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_quote(&self) -> Result<Quote, FeedError> {
        let url = format!("{}/search/", self.config.base_url);

        tracing::debug!(url = %url, query = %self.config.search_query, "Fetching DexScreener price");

        let response = self
            .client
            .get(&url)
            .query(&[("q", self.config.search_query.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::Status {
                provider: PROVIDER,
                status: response.status(),
            });
        }

        let body: SearchResponse = response.json().await?;
        parse_response(body)
    }
}
